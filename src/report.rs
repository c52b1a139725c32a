use crate::{
    error::Result,
    model::{RecordSet, SequenceRecord},
};
use std::path::Path;
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["Accession", "Length", "Description"];

/// Writes one row per record under an `Accession,Length,Description` header,
/// replacing any existing file.
pub fn write_csv(records: &RecordSet, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    // Written explicitly so an empty set still gets a header row.
    writer.write_record(CSV_HEADER)?;
    for record in records {
        let length = record.length.to_string();
        writer.write_record([
            record.accession.as_str(),
            length.as_str(),
            record.description.as_str(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = records.len(), "Saved report");
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<RecordSet> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<SequenceRecord>()
        .map(|row| row.map_err(Into::into))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> RecordSet {
        vec![
            SequenceRecord::new(
                "NC_000913.3",
                4641652,
                "Escherichia coli str. K-12 substr. MG1655, complete genome",
            ),
            SequenceRecord::new("AB000001.1", 250, "plasmid \"pX\" fragment"),
            SequenceRecord::new("AB000002.1", 0, ""),
        ]
        .into()
    }

    #[test]
    fn test_csv_round_trip() {
        let td = tempdir().unwrap();
        let path = td.path().join("report.csv");
        let records = sample();
        write_csv(&records, &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), records);
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let td = tempdir().unwrap();
        let path = td.path().join("report.csv");
        write_csv(&sample(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Accession,Length,Description"));
        assert_eq!(
            lines.next(),
            Some("NC_000913.3,4641652,\"Escherichia coli str. K-12 substr. MG1655, complete genome\"")
        );
        assert_eq!(lines.next(), Some("AB000001.1,250,\"plasmid \"\"pX\"\" fragment\""));
    }

    #[test]
    fn test_empty_set_writes_header_only_and_overwrites() {
        let td = tempdir().unwrap();
        let path = td.path().join("report.csv");
        fs::write(&path, "stale content\nmore\n").unwrap();
        write_csv(&RecordSet::new(), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Accession,Length,Description\n");
        assert!(read_csv(&path).unwrap().is_empty());
    }
}
