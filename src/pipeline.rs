//! One retrieval run: search, fetch, report, chart.
//!
//! Remote faults never abort the process. A failed search ends the run
//! without output, a failed page is skipped by the fetcher, and only local
//! output failures are returned as errors.

use crate::{
    chart::render_length_chart,
    config::RunSettings,
    entrez::EntrezApi,
    error::Result,
    fetcher::BatchFetcher,
    query::RemoteQueryClient,
    report::write_csv,
};
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub total_count: usize,
    pub fetched: usize,
    pub csv_path: PathBuf,
    /// `None` when there was nothing to chart.
    pub chart_path: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The taxonomy lookup or search failed; nothing was written.
    SearchFailed,
    /// The search matched no records; nothing was written.
    NoMatches,
    Completed(RunSummary),
}

pub fn run(api: &dyn EntrezApi, settings: &RunSettings) -> Result<RunOutcome> {
    let query = RemoteQueryClient::new(api);
    let session = match query.search(&settings.tax_id, settings.length_range) {
        Ok(Some(session)) => session,
        Ok(None) => {
            info!("No records to fetch");
            return Ok(RunOutcome::NoMatches);
        }
        Err(e) => {
            warn!(error = %e, "Search failed");
            return Ok(RunOutcome::SearchFailed);
        }
    };

    let fetcher = BatchFetcher::new(api, &settings.fetch);
    let records = match fetcher.fetch(Some(&session), settings.limit) {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Fetch failed");
            Default::default()
        }
    };

    fs::create_dir_all(&settings.out_dir)?;
    let csv_path = settings.csv_path();
    write_csv(&records, &csv_path)?;
    let chart_path = settings.chart_path();
    let charted = render_length_chart(&records, &chart_path)?;

    Ok(RunOutcome::Completed(RunSummary {
        total_count: session.total_count,
        fetched: records.len(),
        csv_path,
        chart_path: charted.then_some(chart_path),
    }))
}
