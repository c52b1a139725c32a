//! Transport to NCBI Entrez E-utilities.
//!
//! [`EntrezApi`] is the seam between the pipeline and the network: the three
//! calls return raw reply bodies and leave parsing to the callers.

use crate::{
    config::EntrezConfig,
    error::Result,
    model::SearchSession,
};
use reqwest::blocking::Client;
use tracing::debug;

pub const NUCLEOTIDE_DB: &str = "nucleotide";
pub const TAXONOMY_DB: &str = "taxonomy";

pub trait EntrezApi {
    /// Taxonomy record for `tax_id` as `TaxaSet` XML.
    fn taxonomy_xml(&self, tax_id: &str) -> Result<String>;

    /// `esearch` on `db` with the history server enabled, as `eSearchResult` XML.
    fn esearch_xml(&self, db: &str, term: &str) -> Result<String>;

    /// One page of a cached nucleotide result set as GenBank flat text.
    fn efetch_genbank(
        &self,
        session: &SearchSession,
        retstart: usize,
        retmax: usize,
    ) -> Result<String>;
}

/// Blocking HTTP client for the public E-utilities endpoint.
pub struct NcbiClient {
    config: EntrezConfig,
    http: Client,
}

impl NcbiClient {
    pub fn new(config: EntrezConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("{}/{}", config.tool, env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &EntrezConfig {
        &self.config
    }

    /// Identity parameters NCBI expects on every request.
    fn identity_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("tool", self.config.tool.clone()),
            ("email", self.config.email.clone()),
        ];
        if !self.config.api_key.is_empty() {
            params.push(("api_key", self.config.api_key.clone()));
        }
        params
    }

    fn get(&self, utility: &str, params: Vec<(&'static str, String)>) -> Result<String> {
        let url = self.config.endpoint(utility);
        debug!(%url, ?params, "Entrez request");
        let mut query = params;
        query.extend(self.identity_params());
        let response = self
            .http
            .get(&url)
            .query(&query)
            .send()?
            .error_for_status()?;
        Ok(response.text()?)
    }
}

impl EntrezApi for NcbiClient {
    fn taxonomy_xml(&self, tax_id: &str) -> Result<String> {
        self.get(
            "efetch.fcgi",
            vec![
                ("db", TAXONOMY_DB.to_string()),
                ("id", tax_id.to_string()),
                ("retmode", "xml".to_string()),
            ],
        )
    }

    fn esearch_xml(&self, db: &str, term: &str) -> Result<String> {
        self.get(
            "esearch.fcgi",
            vec![
                ("db", db.to_string()),
                ("term", term.to_string()),
                ("usehistory", "y".to_string()),
            ],
        )
    }

    fn efetch_genbank(
        &self,
        session: &SearchSession,
        retstart: usize,
        retmax: usize,
    ) -> Result<String> {
        self.get(
            "efetch.fcgi",
            vec![
                ("db", NUCLEOTIDE_DB.to_string()),
                ("rettype", "gb".to_string()),
                ("retmode", "text".to_string()),
                ("retstart", retstart.to_string()),
                ("retmax", retmax.to_string()),
                ("WebEnv", session.web_env.clone()),
                ("query_key", session.query_key.clone()),
            ],
        )
    }
}
