use crate::{
    config::FetchSettings,
    entrez::EntrezApi,
    error::{Result, RetrieveError},
    genbank::parse_genbank_page,
    model::{RecordSet, SearchSession, SequenceRecord},
};
use std::thread;
use tracing::{info, warn};

/// One efetch window over the cached result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub retstart: usize,
    pub retmax: usize,
}

/// Splits `max_records` into consecutive pages of at most `page_size`.
pub fn plan_pages(max_records: usize, page_size: usize) -> Vec<PageRequest> {
    let page_size = page_size.max(1);
    (0..max_records)
        .step_by(page_size)
        .map(|retstart| PageRequest {
            retstart,
            retmax: page_size.min(max_records - retstart),
        })
        .collect()
}

/// Records to fetch: the whole result set, capped by `limit` when one is given.
/// A zero limit means no cap.
pub fn max_records(total_count: usize, limit: Option<usize>) -> usize {
    match limit {
        Some(limit) if limit > 0 => total_count.min(limit),
        _ => total_count,
    }
}

pub struct BatchFetcher<'a> {
    api: &'a dyn EntrezApi,
    settings: &'a FetchSettings,
}

impl<'a> BatchFetcher<'a> {
    pub fn new(api: &'a dyn EntrezApi, settings: &'a FetchSettings) -> Self {
        Self { api, settings }
    }

    /// Pages through the session. A page that fails is logged and skipped, so
    /// the result may hold fewer records than requested.
    pub fn fetch(&self, session: Option<&SearchSession>, limit: Option<usize>) -> Result<RecordSet> {
        let session = session.ok_or_else(|| {
            RetrieveError::State("search not yet performed; run a search first".to_string())
        })?;
        let max_records = max_records(session.total_count, limit);
        info!("Fetching {max_records} records");

        let pages = plan_pages(max_records, self.settings.page_size);
        let mut records = RecordSet::new();
        for (page_idx, page) in pages.iter().enumerate() {
            if page_idx > 0 && !self.settings.page_delay.is_zero() {
                thread::sleep(self.settings.page_delay);
            }
            info!(
                "Fetching: {} - {}",
                page.retstart + 1,
                page.retstart + page.retmax
            );
            match self.fetch_page(session, page) {
                Ok(batch) => records.extend(batch),
                Err(e) => {
                    warn!(error = %e, retstart = page.retstart, "Skipping page after fetch error");
                }
            }
        }
        records.truncate(max_records);
        info!(fetched = records.len(), requested = max_records, "Fetch finished");
        Ok(records)
    }

    fn fetch_page(&self, session: &SearchSession, page: &PageRequest) -> Result<Vec<SequenceRecord>> {
        let text = self
            .api
            .efetch_genbank(session, page.retstart, page.retmax)?;
        parse_genbank_page(&text)
    }
}
