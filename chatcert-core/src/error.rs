//! Error types shared by providers and the conformance suites

use thiserror::Error;

/// The main error type for provider operations
///
/// Provider-internal failures propagate through a scenario uncaught; the
/// conformance suites never retry or suppress them, they only classify them.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The provider itself failed while answering
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name (e.g. "scripted")
        provider: String,
        /// What went wrong
        message: String,
    },

    /// A response record was missing the data needed to extract a message
    #[error("malformed response record: {0}")]
    MalformedRecord(String),

    /// An optimizer tag was not one of the recognized names
    #[error("unrecognized optimizer tag: {0:?}")]
    UnknownOptimizer(String),
}

impl Error {
    /// Convenience constructor for provider-internal failures
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;
