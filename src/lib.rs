//! Snapshot of NCBI nucleotide records for one taxon.
//!
//! A run resolves the taxon, searches the nucleotide database on the Entrez
//! history server, pages through the matches, and writes a CSV report plus a
//! PNG chart of sequence lengths. See [`pipeline::run`].

pub mod chart;
pub mod config;
pub mod entrez;
pub mod entrez_xml;
pub mod error;
pub mod fetcher;
pub mod genbank;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod report;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, RetrieveError};
pub use model::{RecordSet, SearchSession, SequenceRecord};
