use crate::{
    error::{Result, RetrieveError},
    model::SequenceRecord,
};
use gb_io::{reader::SeqReader, seq::Seq};

/// Parses one efetch page of GenBank flat text. An empty page yields no records.
pub fn parse_genbank_page(text: &str) -> Result<Vec<SequenceRecord>> {
    SeqReader::new(text.as_bytes())
        .enumerate()
        .map(|(record_idx, parsed)| {
            parsed.map(|seq| record_from_seq(&seq)).map_err(|e| {
                RetrieveError::Parse(format!(
                    "Could not parse GenBank record {}: {e}",
                    record_idx + 1
                ))
            })
        })
        .collect()
}

fn first_token(value: Option<&str>) -> Option<String> {
    value
        .and_then(|v| v.split_whitespace().next())
        .map(ToOwned::to_owned)
}

pub fn record_from_seq(seq: &Seq) -> SequenceRecord {
    let accession = first_token(seq.version.as_deref())
        .or_else(|| first_token(seq.accession.as_deref()))
        .or_else(|| first_token(seq.name.as_deref()))
        .unwrap_or_default();
    // CONTIG-style records carry no residues, only the LOCUS length.
    let length = if seq.seq.is_empty() {
        seq.len.unwrap_or(0)
    } else {
        seq.seq.len()
    };
    let definition = seq.definition.as_deref().unwrap_or_default().trim();
    let description = definition.strip_suffix('.').unwrap_or(definition).to_string();
    SequenceRecord {
        accession,
        length,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::genbank_entry;

    #[test]
    fn test_parse_page_with_two_records() {
        let page = format!(
            "{}{}",
            genbank_entry("MN908947", 240, "SARS-CoV-2 isolate Wuhan-Hu-1, complete genome"),
            genbank_entry("OK091006", 75, "Test sequence, partial cds")
        );
        let records = parse_genbank_page(&page).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].accession, "MN908947.1");
        assert_eq!(records[0].length, 240);
        assert_eq!(
            records[0].description,
            "SARS-CoV-2 isolate Wuhan-Hu-1, complete genome"
        );
        assert_eq!(records[1].accession, "OK091006.1");
        assert_eq!(records[1].length, 75);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(parse_genbank_page("").unwrap().is_empty());
    }

    #[test]
    fn test_record_from_seq_falls_back_to_accession_and_locus_length() {
        let mut seq = Seq::empty();
        seq.name = Some("LOCUS1".to_string());
        seq.accession = Some("AB000123 AB000124".to_string());
        seq.len = Some(5000);
        seq.definition = Some("Scaffold without residues.".to_string());
        let record = record_from_seq(&seq);
        assert_eq!(record.accession, "AB000123");
        assert_eq!(record.length, 5000);
        assert_eq!(record.description, "Scaffold without residues");
    }
}
