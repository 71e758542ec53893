use thiserror::Error;

/// Errors that can occur around recipe capture.
///
/// Text extraction itself never fails; these come from the collaborators
/// (page fetching, LLM providers, configuration and the builder).
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Failed to fetch content from a URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// An external extraction provider could not be set up or failed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
