use crate::error::{Result, RetrieveError};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";
pub const DEFAULT_TOOL_NAME: &str = "seqsnap";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PAGE_SIZE: usize = 500;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub const DEFAULT_MIN_LEN: usize = 200;
pub const DEFAULT_MAX_LEN: usize = 10000;
pub const DEFAULT_LIMIT: usize = 10;

/// Identity and endpoint for the Entrez service. Passed to the client at
/// construction; nothing here is process-wide.
#[derive(Clone, Debug)]
pub struct EntrezConfig {
    pub email: String,
    pub api_key: String,
    pub tool: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl EntrezConfig {
    pub fn new(email: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            api_key: api_key.into(),
            tool: DEFAULT_TOOL_NAME.to_string(),
            base_url: DEFAULT_EUTILS_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Full URL of one E-utility, e.g. `esearch.fcgi`.
    pub fn endpoint(&self, utility: &str) -> String {
        format!("{}/{utility}", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Clone, Debug)]
pub struct FetchSettings {
    pub page_size: usize,
    pub page_delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
        }
    }
}

/// Inclusive sequence length filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthRange {
    min: usize,
    max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(RetrieveError::Config(format!(
                "Invalid length range: minimum ({min}) is greater than maximum ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_LEN,
            max: DEFAULT_MAX_LEN,
        }
    }
}

/// Everything one run needs besides the client.
#[derive(Clone, Debug)]
pub struct RunSettings {
    pub tax_id: String,
    pub length_range: LengthRange,
    pub limit: Option<usize>,
    pub out_dir: PathBuf,
    pub fetch: FetchSettings,
}

impl RunSettings {
    pub fn new(tax_id: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            length_range: LengthRange::default(),
            limit: Some(DEFAULT_LIMIT),
            out_dir: PathBuf::from("."),
            fetch: FetchSettings::default(),
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.out_dir.join(format!("taxid_{}_raport.csv", self.tax_id))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.out_dir.join(format!("taxid_{}_wykres.png", self.tax_id))
    }
}

/// Optional JSON settings file. Every key may be omitted.
#[derive(Default, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SettingsFile {
    pub tool: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_delay_ms: Option<u64>,
    pub out_dir: Option<String>,
}

impl SettingsFile {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            RetrieveError::Config(format!(
                "Could not read settings file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&text).map_err(|e| {
            RetrieveError::Config(format!(
                "Could not parse settings file '{}': {e}",
                path.display()
            ))
        })
    }

    pub fn from_json_str(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn apply_to_entrez(&self, config: &mut EntrezConfig) {
        if let Some(tool) = &self.tool {
            config.tool = tool.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
    }

    pub fn apply_to_run(&self, settings: &mut RunSettings) {
        if let Some(ms) = self.page_delay_ms {
            settings.fetch.page_delay = Duration::from_millis(ms);
        }
        if let Some(dir) = &self.out_dir {
            settings.out_dir = PathBuf::from(dir);
        }
    }
}
