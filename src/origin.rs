//! Derivation of the externally visible origin of the current inbound request.
//!
//! Provider adapters need the scheme, host, and port the outside world used to
//! reach the application when constructing OAuth callback URLs. Behind a
//! reverse proxy the transport-reported scheme is wrong, so forwarding headers
//! take precedence over it. The inbound request is represented as a
//! string-keyed map of CGI-style gateway metadata.

use std::collections::HashMap;
use std::fmt;

/// Port the inbound connection was accepted on.
pub const SERVER_PORT: &str = "SERVER_PORT";
/// Server name declared by the gateway.
pub const SERVER_NAME: &str = "SERVER_NAME";
/// Explicit `Host` request header, preferred over [`SERVER_NAME`].
pub const HTTP_HOST: &str = "HTTP_HOST";
/// Gateway SSL flag, `"on"` when the inbound request itself used TLS.
pub const HTTPS: &str = "HTTPS";
/// `X-Forwarded-Ssl` header, `"on"` when a proxy terminated TLS.
pub const HTTP_X_FORWARDED_SSL: &str = "HTTP_X_FORWARDED_SSL";
/// `X-Forwarded-Proto` header, possibly a comma-separated chain.
pub const HTTP_X_FORWARDED_PROTO: &str = "HTTP_X_FORWARDED_PROTO";
/// Scheme reported by the transport for the inbound request.
pub const REQUEST_SCHEME: &str = "request.scheme";

// Conventional HTTP port, omitted from rendered origins.
const DEFAULT_HTTP_PORT: &str = "80";

/// Gateway metadata for the current inbound request.
pub type RequestEnv = HashMap<String, String>;

/// The scheme+host\[:port\] triple the outside world used to address the
/// current inbound request.
///
/// Recomputed per call, never persisted. `port` stays `None` when the host
/// came from an explicit `Host` header (which may embed its own port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Externally visible scheme, `"http"` or `"https"`.
    pub scheme: String,
    /// Externally visible host.
    pub host: String,
    /// Externally visible port, absent for the conventional HTTP port.
    pub port: Option<String>,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = &self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// Resolves the externally visible scheme of the inbound request.
///
/// Priority order matters: the gateway SSL flag, then the forwarded-SSL flag,
/// then the first value of the forwarded-proto chain, then the
/// transport-reported scheme. Falls back to `"http"` when no scheme metadata
/// is present at all.
///
/// Proxies commonly pad the forwarded-proto chain with spaces after the
/// commas, so the first value is trimmed before use.
pub fn resolve_scheme(env: &RequestEnv) -> String {
    if env.get(HTTPS).is_some_and(|v| v == "on") {
        return "https".to_string();
    }
    if env.get(HTTP_X_FORWARDED_SSL).is_some_and(|v| v == "on") {
        return "https".to_string();
    }
    if let Some(proto) = env.get(HTTP_X_FORWARDED_PROTO) {
        if let Some(first) = proto.split(',').next() {
            return first.trim().to_string();
        }
    }
    env.get(REQUEST_SCHEME)
        .cloned()
        .unwrap_or_else(|| "http".to_string())
}

/// Resolves the externally visible origin of the inbound request.
///
/// The explicit `Host` header wins when present; otherwise the declared
/// server name is used together with the server port, unless that port is
/// the conventional HTTP port 80. With neither host source present the
/// origin carries an empty host.
pub fn resolve_origin(env: &RequestEnv) -> Origin {
    let scheme = resolve_scheme(env);

    if let Some(host) = env.get(HTTP_HOST) {
        return Origin {
            scheme,
            host: host.clone(),
            port: None,
        };
    }

    let host = env.get(SERVER_NAME).cloned().unwrap_or_default();
    let port = env
        .get(SERVER_PORT)
        .filter(|port| port.as_str() != DEFAULT_HTTP_PORT)
        .cloned();
    Origin { scheme, host, port }
}
