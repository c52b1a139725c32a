//! Entrez XML reply parsing (`esearch` results and taxonomy `efetch`).
//!
//! Only the handful of elements the pipeline needs are mapped; everything
//! else in the reply is skipped by the deserializer.

use crate::error::{Result, RetrieveError};
use serde::Deserialize;

/// What an `esearch` call with `usehistory=y` tells us.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ESearchReply {
    pub count: usize,
    pub web_env: Option<String>,
    pub query_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxonSummary {
    pub tax_id: Option<String>,
    pub scientific_name: String,
    pub rank: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "eSearchResult")]
struct ESearchResultXml {
    #[serde(rename = "Count")]
    count: Option<String>,
    #[serde(rename = "QueryKey")]
    query_key: Option<String>,
    #[serde(rename = "WebEnv")]
    web_env: Option<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "TaxaSet")]
struct TaxaSetXml {
    #[serde(rename = "Taxon", default)]
    taxa: Vec<TaxonXml>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonXml {
    #[serde(rename = "TaxId")]
    tax_id: Option<String>,
    #[serde(rename = "ScientificName")]
    scientific_name: Option<String>,
    #[serde(rename = "Rank")]
    rank: Option<String>,
}

fn nonempty_owned(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

pub fn parse_esearch_reply(xml: &str) -> Result<ESearchReply> {
    let parsed: ESearchResultXml = quick_xml::de::from_str(xml)
        .map_err(|e| RetrieveError::Parse(format!("Malformed eSearchResult XML: {e}")))?;
    if let Some(error) = nonempty_owned(parsed.error.as_deref()) {
        return Err(RetrieveError::Remote(format!("esearch failed: {error}")));
    }
    let count_text = nonempty_owned(parsed.count.as_deref()).ok_or_else(|| {
        RetrieveError::Parse("Malformed eSearchResult XML: no Count element".to_string())
    })?;
    let count = count_text.parse::<usize>().map_err(|e| {
        RetrieveError::Parse(format!("Malformed eSearchResult Count '{count_text}': {e}"))
    })?;
    Ok(ESearchReply {
        count,
        web_env: nonempty_owned(parsed.web_env.as_deref()),
        query_key: nonempty_owned(parsed.query_key.as_deref()),
    })
}

/// `Ok(None)` when the reply carries no taxon with a scientific name.
pub fn parse_taxonomy_reply(xml: &str) -> Result<Option<TaxonSummary>> {
    let parsed: TaxaSetXml = quick_xml::de::from_str(xml)
        .map_err(|e| RetrieveError::Parse(format!("Malformed TaxaSet XML: {e}")))?;
    if let Some(error) = nonempty_owned(parsed.error.as_deref()) {
        return Err(RetrieveError::Remote(format!("taxonomy lookup failed: {error}")));
    }
    Ok(parsed.taxa.into_iter().find_map(|taxon| {
        let scientific_name = nonempty_owned(taxon.scientific_name.as_deref())?;
        Some(TaxonSummary {
            tax_id: nonempty_owned(taxon.tax_id.as_deref()),
            scientific_name,
            rank: nonempty_owned(taxon.rank.as_deref()),
        })
    }))
}
