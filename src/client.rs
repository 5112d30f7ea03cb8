//! Outbound connections to contact providers.
//!
//! Each call opens a fresh connection, issues one request, and releases the
//! connection on every path; there is no pool, no retry, and no timeout
//! beyond the transport defaults. Redirects are disabled so that 3xx
//! responses reach the response processor as failures.
//!
//! HTTPS trust is an explicit decision supplied at construction time: with a
//! CA file the provider certificate is verified against it; without one the
//! client falls back to skipping verification and says so through the
//! optional warning sink. The fallback is never silent by design.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use log::warn;
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Certificate;

use crate::error::FetchError;
use crate::query::{encode_query, QueryMap};
use crate::response::{process, HttpResult};

const INSECURE_TLS_WARNING: &str = "No CA file configured; TLS certificate \
     verification is disabled. Supply one in production environments.";

/// TLS trust material for outbound HTTPS calls.
///
/// When `ca_file` is absent the client degrades to insecure mode rather than
/// failing, trading strictness for availability; production callers are
/// expected to supply a CA file.
#[derive(Debug, Clone, Default)]
pub struct TrustConfig {
    /// Path to a PEM CA certificate used to verify provider certificates.
    pub ca_file: Option<PathBuf>,
}

impl TrustConfig {
    /// Trust configuration that verifies providers against the given CA file.
    pub fn verified(ca_file: impl Into<PathBuf>) -> Self {
        TrustConfig {
            ca_file: Some(ca_file.into()),
        }
    }

    /// Trust configuration with no CA material; HTTPS calls will skip peer
    /// verification and emit a warning.
    pub fn insecure() -> Self {
        TrustConfig { ca_file: None }
    }
}

/// Receives the warning emitted when an HTTPS call runs without CA material.
pub trait WarningSink: Send + Sync {
    /// Delivers one warning line.
    fn warn(&self, message: &str);
}

/// [`WarningSink`] that forwards to the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, message: &str) {
        warn!("{message}");
    }
}

/// Blocking HTTP/HTTPS client for contact-provider calls.
///
/// Safe to share across threads: every call builds its own connection and
/// shares no mutable state.
pub struct ProviderClient {
    trust: TrustConfig,
    warning_sink: Option<Arc<dyn WarningSink>>,
}

impl ProviderClient {
    /// Creates a client with the given trust configuration and no warning
    /// sink.
    pub fn new(trust: TrustConfig) -> Self {
        ProviderClient {
            trust,
            warning_sink: None,
        }
    }

    /// Registers a sink for the insecure-TLS warning.
    #[must_use]
    pub fn with_warning_sink(mut self, sink: Arc<dyn WarningSink>) -> Self {
        self.warning_sink = Some(sink);
        self
    }

    /// Executes a plaintext HTTP GET against `host`.
    ///
    /// The encoded `params` are appended to `path` as a query string. Query
    /// values are not percent-encoded on the way out (see
    /// [`encode_query`](crate::query::encode_query)).
    ///
    /// # Errors
    ///
    /// Fails with [`FetchError::Http`] for any status other than 200, or
    /// [`FetchError::Transport`] when the request itself fails.
    pub fn http_get(&self, host: &str, path: &str, params: &QueryMap) -> Result<String, FetchError> {
        let client = plain_client()?;
        let response = client.get(build_url("http", host, path, params)).send()?;
        process(into_result(response)?)
    }

    /// Executes an HTTPS GET against `host` on port 443, with optional extra
    /// request headers.
    ///
    /// # Errors
    ///
    /// Fails with [`FetchError::Http`] for any status other than 200,
    /// [`FetchError::Transport`] for transport failures, or a CA-file error
    /// when the configured trust material is unusable.
    pub fn https_get(
        &self,
        host: &str,
        path: &str,
        params: &QueryMap,
        headers: &HashMap<String, String>,
    ) -> Result<String, FetchError> {
        let client = self.tls_client()?;
        let mut request = client.get(build_url("https", host, path, params));
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        process(into_result(request.send()?)?)
    }

    /// Executes an HTTPS POST against `host` on port 443, sending the encoded
    /// `params` as a form body.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ProviderClient::https_get`].
    pub fn https_post(
        &self,
        host: &str,
        path: &str,
        params: &QueryMap,
    ) -> Result<String, FetchError> {
        let client = self.tls_client()?;
        let response = client
            .post(format!("https://{host}{path}"))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encode_query(params))
            .send()?;
        process(into_result(response)?)
    }

    // Builds the per-call TLS client, applying the trust decision. Called
    // once per HTTPS call, so the insecure fallback warns once per call.
    fn tls_client(&self) -> Result<Client, FetchError> {
        let builder = base_builder();
        let builder = match &self.trust.ca_file {
            Some(path) => {
                let pem = fs::read(path).map_err(|source| FetchError::CaFileRead {
                    path: path.clone(),
                    source,
                })?;
                let cert =
                    Certificate::from_pem(&pem).map_err(|source| FetchError::CaFileParse {
                        path: path.clone(),
                        source,
                    })?;
                builder
                    .tls_built_in_root_certs(false)
                    .add_root_certificate(cert)
            }
            None => {
                if let Some(sink) = &self.warning_sink {
                    sink.warn(INSECURE_TLS_WARNING);
                }
                builder.danger_accept_invalid_certs(true)
            }
        };
        Ok(builder.build()?)
    }
}

fn base_builder() -> ClientBuilder {
    Client::builder().redirect(Policy::none())
}

fn plain_client() -> Result<Client, FetchError> {
    Ok(base_builder().build()?)
}

fn build_url(scheme: &str, host: &str, path: &str, params: &QueryMap) -> String {
    format!("{scheme}://{host}{path}?{}", encode_query(params))
}

fn into_result(response: Response) -> Result<HttpResult, FetchError> {
    let status_code = response.status().as_u16();
    let body = response.text()?;
    Ok(HttpResult { status_code, body })
}
