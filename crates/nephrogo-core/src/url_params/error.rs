//! Error type for URL parameter merging.

use thiserror::Error;

/// Failure while merging parameters into a URL. No partial URL is ever returned.
#[derive(Debug, Error)]
pub enum UrlParamsError {
    /// Scheme or authority present but the URL does not parse.
    #[error("malformed URL {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// A parameter value could not be turned into query text.
    #[error("cannot encode URL parameters: {0}")]
    Encoding(String),
}

impl UrlParamsError {
    pub(super) fn malformed(url: &str, source: url::ParseError) -> Self {
        UrlParamsError::MalformedUrl {
            url: url.to_string(),
            source,
        }
    }
}

impl From<serde_json::Error> for UrlParamsError {
    fn from(err: serde_json::Error) -> Self {
        UrlParamsError::Encoding(err.to_string())
    }
}
