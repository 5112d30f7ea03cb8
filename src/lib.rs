//! contact_http: HTTP support layer for contact-import providers
//!
//! This library backs provider adapters that import contacts from third-party
//! services. It covers the plumbing those adapters share: outbound HTTP/HTTPS
//! calls with an explicit TLS trust decision, a query-string codec, derivation
//! of the caller's externally visible origin from gateway metadata, and
//! normalization of free-text identity fields (names, emails, birthdays)
//! harvested from provider responses.
//!
//! # Example
//!
//! ```no_run
//! use contact_http::{ProviderClient, QueryMap, TrustConfig};
//!
//! # fn main() -> Result<(), contact_http::FetchError> {
//! let client = ProviderClient::new(TrustConfig::verified(
//!     "/etc/ssl/certs/ca-certificates.crt",
//! ));
//!
//! let mut params = QueryMap::new();
//! params.insert("access_token".into(), Some("token".into()));
//!
//! let body = client.https_get("api.example.com", "/v1/contacts", &params, &Default::default())?;
//! println!("provider returned {} bytes", body.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Scope
//!
//! OAuth flows, retries, caching, and response-body parsing are left to the
//! calling adapters. Every call here is synchronous and blocking, opens a
//! fresh connection, and releases it on both success and failure paths.

#![warn(missing_docs)]

pub mod birthday;
pub mod client;
pub mod error;
pub mod identity;
pub mod origin;
pub mod query;
pub mod response;

// Re-export public API
pub use birthday::{birthday, Birthday, DateField};
pub use client::{LogSink, ProviderClient, TrustConfig, WarningSink};
pub use error::FetchError;
pub use identity::{email_to_name, full_name, normalize_name, Name};
pub use origin::{resolve_origin, resolve_scheme, Origin, RequestEnv};
pub use query::{decode_query, encode_query, percent_encode, QueryMap};
pub use response::{process, HttpResult};
