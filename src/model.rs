use serde::{Deserialize, Serialize};

/// One nucleotide record as it appears in the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    #[serde(rename = "Accession")]
    pub accession: String,
    #[serde(rename = "Length")]
    pub length: usize,
    #[serde(rename = "Description")]
    pub description: String,
}

impl SequenceRecord {
    pub fn new(accession: impl Into<String>, length: usize, description: impl Into<String>) -> Self {
        Self {
            accession: accession.into(),
            length,
            description: description.into(),
        }
    }
}

/// Handle on a server-side cached result set (Entrez history server).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSession {
    pub web_env: String,
    pub query_key: String,
    pub total_count: usize,
}

/// Records in fetch order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<SequenceRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SequenceRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = SequenceRecord>) {
        self.records.extend(records);
    }

    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SequenceRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SequenceRecord] {
        &self.records
    }

    /// A copy ordered by length, longest first. Equal lengths keep fetch order.
    pub fn sorted_by_length_desc(&self) -> Vec<SequenceRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.length.cmp(&a.length));
        sorted
    }
}

impl From<Vec<SequenceRecord>> for RecordSet {
    fn from(records: Vec<SequenceRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<SequenceRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = SequenceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a SequenceRecord;
    type IntoIter = std::slice::Iter<'a, SequenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
