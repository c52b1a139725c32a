use thiserror::Error;

pub type Result<T> = std::result::Result<T, RetrieveError>;

#[derive(Debug, Error)]
pub enum RetrieveError {
    /// The taxonomy ID resolved to no record
    #[error("not found: {0}")]
    NotFound(String),

    /// The service answered, but with an error or an unusable reply
    #[error("remote error: {0}")]
    Remote(String),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// A reply body (XML or GenBank text) could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Fetch attempted before a successful search
    #[error("invalid state: {0}")]
    State(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl RetrieveError {
    /// True for faults that originate at the remote service or on the way to it.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Remote(_) | Self::Http(_) | Self::Parse(_)
        )
    }
}
