use crate::{
    config::LengthRange,
    entrez::{EntrezApi, NUCLEOTIDE_DB},
    entrez_xml::{parse_esearch_reply, parse_taxonomy_reply},
    error::{Result, RetrieveError},
    model::SearchSession,
};
use tracing::info;

/// Entrez query restricting nucleotide records to a taxon and a length window.
pub fn search_term(tax_id: &str, range: LengthRange) -> String {
    format!(
        "txid{}[Organism] AND {}:{}[SLEN]",
        tax_id.trim(),
        range.min(),
        range.max()
    )
}

pub struct RemoteQueryClient<'a> {
    api: &'a dyn EntrezApi,
}

impl<'a> RemoteQueryClient<'a> {
    pub fn new(api: &'a dyn EntrezApi) -> Self {
        Self { api }
    }

    /// Scientific name of the taxon.
    pub fn lookup_organism(&self, tax_id: &str) -> Result<String> {
        let xml = self.api.taxonomy_xml(tax_id)?;
        parse_taxonomy_reply(&xml)?
            .map(|taxon| taxon.scientific_name)
            .ok_or_else(|| {
                RetrieveError::NotFound(format!("Taxonomy ID '{tax_id}' resolves to no record"))
            })
    }

    /// Runs the search on the history server. `Ok(None)` means zero matches.
    pub fn search(&self, tax_id: &str, range: LengthRange) -> Result<Option<SearchSession>> {
        info!(
            tax_id,
            min_len = range.min(),
            max_len = range.max(),
            "Searching nucleotide records"
        );
        let organism = self.lookup_organism(tax_id)?;
        info!(%organism, "Organism resolved");

        let term = search_term(tax_id, range);
        let xml = self.api.esearch_xml(NUCLEOTIDE_DB, &term)?;
        let reply = parse_esearch_reply(&xml)?;
        info!(count = reply.count, "Found {} records", reply.count);
        if reply.count == 0 {
            return Ok(None);
        }

        let (Some(web_env), Some(query_key)) = (reply.web_env, reply.query_key) else {
            return Err(RetrieveError::Remote(
                "esearch reported matches but returned no WebEnv/QueryKey".to_string(),
            ));
        };
        Ok(Some(SearchSession {
            web_env,
            query_key,
            total_count: reply.count,
        }))
    }
}
