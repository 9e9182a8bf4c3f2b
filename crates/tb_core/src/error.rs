use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Extraction error for {url}: {reason}")]
    Extraction { url: String, reason: String },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn extraction(url: &str, reason: impl Into<String>) -> Self {
        Error::Extraction {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
