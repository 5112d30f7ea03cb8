//! Error types for provider calls.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of one outbound provider call.
///
/// A non-200 response surfaces as [`FetchError::Http`] carrying the raw
/// response body, so callers can pass the provider's own diagnostic text
/// through to their users instead of a generic message. Nothing is retried
/// or recovered internally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider answered with a status other than 200. Redirects are not
    /// followed, so 3xx responses land here too.
    #[error("provider returned HTTP {status}: {body}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body, the provider's own failure detail.
        body: String,
    },

    /// Connecting, sending, or reading the response failed at the transport
    /// level.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured CA file could not be read.
    #[error("failed to read CA file {path:?}: {source}")]
    CaFileRead {
        /// Path the trust configuration pointed at.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configured CA file did not contain a valid PEM certificate.
    #[error("invalid CA certificate in {path:?}: {source}")]
    CaFileParse {
        /// Path the trust configuration pointed at.
        path: PathBuf,
        /// Underlying parse error.
        source: reqwest::Error,
    },
}
