//! Scripted Entrez double and GenBank text builders shared by unit tests.

use crate::{
    entrez::EntrezApi,
    error::{Result, RetrieveError},
    model::SearchSession,
};
use std::{cell::RefCell, collections::HashSet};

pub const TEST_WEB_ENV: &str = "MCID_test_webenv";
pub const TEST_QUERY_KEY: &str = "1";

/// Residues written to the ORIGIN block, 60 per line in groups of 10.
fn origin_block(length: usize) -> String {
    let residues: Vec<u8> = b"acgt".iter().copied().cycle().take(length).collect();
    let mut out = String::from("ORIGIN      \n");
    for (line_idx, line) in residues.chunks(60).enumerate() {
        let groups: Vec<&str> = line
            .chunks(10)
            .map(|group| std::str::from_utf8(group).unwrap_or_default())
            .collect();
        out.push_str(&format!("{:>9} {}\n", line_idx * 60 + 1, groups.join(" ")));
    }
    out
}

/// One complete GenBank flat-file entry; `definition` must fit on one line.
pub fn genbank_entry(accession: &str, length: usize, definition: &str) -> String {
    let header = [
        format!("LOCUS       {accession:<16} {length:>11} bp    DNA     linear   BCT 01-JAN-2020"),
        format!("DEFINITION  {definition}."),
        format!("ACCESSION   {accession}"),
        format!("VERSION     {accession}.1"),
        "KEYWORDS    .".to_string(),
        "SOURCE      Escherichia coli".to_string(),
        "  ORGANISM  Escherichia coli".to_string(),
        "            Bacteria; Pseudomonadota; Gammaproteobacteria.".to_string(),
        "FEATURES             Location/Qualifiers".to_string(),
        format!("     source          1..{length}"),
        "                     /organism=\"Escherichia coli\"".to_string(),
    ];
    format!("{}\n{}//\n", header.join("\n"), origin_block(length))
}

pub fn test_accession(idx: usize) -> String {
    format!("TS{idx:06}")
}

pub fn test_length(idx: usize) -> usize {
    200 + (idx * 37) % 800
}

pub fn test_session(total_count: usize) -> SearchSession {
    SearchSession {
        web_env: TEST_WEB_ENV.to_string(),
        query_key: TEST_QUERY_KEY.to_string(),
        total_count,
    }
}

pub fn taxonomy_xml(tax_id: &str, name: &str) -> String {
    format!(
        "<?xml version=\"1.0\" ?>\n<TaxaSet><Taxon><TaxId>{tax_id}</TaxId><ScientificName>{name}</ScientificName><Rank>species</Rank></Taxon></TaxaSet>\n"
    )
}

pub fn esearch_xml(count: usize) -> String {
    if count == 0 {
        return "<eSearchResult><Count>0</Count><RetMax>0</RetMax><RetStart>0</RetStart><IdList/></eSearchResult>".to_string();
    }
    format!(
        "<eSearchResult><Count>{count}</Count><RetMax>20</RetMax><RetStart>0</RetStart><QueryKey>{TEST_QUERY_KEY}</QueryKey><WebEnv>{TEST_WEB_ENV}</WebEnv><IdList><Id>1</Id></IdList></eSearchResult>"
    )
}

/// In-memory Entrez that serves `available` records and fails the pages
/// whose `retstart` is listed in `failing_offsets`.
pub struct ScriptedEntrez {
    pub taxonomy_reply: Option<String>,
    pub esearch_reply: Option<String>,
    pub available: usize,
    pub failing_offsets: HashSet<usize>,
    pub page_calls: RefCell<Vec<(usize, usize)>>,
    pub search_terms: RefCell<Vec<String>>,
}

impl ScriptedEntrez {
    pub fn with_matches(count: usize) -> Self {
        Self {
            taxonomy_reply: Some(taxonomy_xml("562", "Escherichia coli")),
            esearch_reply: Some(esearch_xml(count)),
            available: count,
            failing_offsets: HashSet::new(),
            page_calls: RefCell::new(vec![]),
            search_terms: RefCell::new(vec![]),
        }
    }

    pub fn failing_at(mut self, retstart: usize) -> Self {
        self.failing_offsets.insert(retstart);
        self
    }

    pub fn page_calls(&self) -> Vec<(usize, usize)> {
        self.page_calls.borrow().clone()
    }
}

impl EntrezApi for ScriptedEntrez {
    fn taxonomy_xml(&self, _tax_id: &str) -> Result<String> {
        self.taxonomy_reply
            .clone()
            .ok_or_else(|| RetrieveError::Remote("taxonomy service unavailable".to_string()))
    }

    fn esearch_xml(&self, _db: &str, term: &str) -> Result<String> {
        self.search_terms.borrow_mut().push(term.to_string());
        self.esearch_reply
            .clone()
            .ok_or_else(|| RetrieveError::Remote("esearch service unavailable".to_string()))
    }

    fn efetch_genbank(
        &self,
        session: &SearchSession,
        retstart: usize,
        retmax: usize,
    ) -> Result<String> {
        self.page_calls.borrow_mut().push((retstart, retmax));
        assert_eq!(session.web_env, TEST_WEB_ENV);
        if self.failing_offsets.contains(&retstart) {
            return Err(RetrieveError::Remote(format!(
                "simulated transport error at offset {retstart}"
            )));
        }
        let end = (retstart + retmax).min(self.available);
        Ok((retstart..end)
            .map(|idx| {
                genbank_entry(
                    &test_accession(idx),
                    test_length(idx),
                    &format!("Synthetic record {idx}"),
                )
            })
            .collect())
    }
}
