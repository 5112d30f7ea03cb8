//! Classification of provider responses as success or failure.

use crate::error::FetchError;

/// Raw outcome of one provider request.
///
/// Owned exclusively by the call that produced it and discarded once the
/// caller consumes the body or the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
}

/// Classifies a provider response.
///
/// Returns the body for status 200. Any other status, including redirects
/// and 4xx/5xx, fails with the body as the error detail; there is no
/// special-case handling for redirects.
pub fn process(result: HttpResult) -> Result<String, FetchError> {
    if result.status_code == 200 {
        Ok(result.body)
    } else {
        Err(FetchError::Http {
            status: result.status_code,
            body: result.body,
        })
    }
}
