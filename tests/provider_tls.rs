//! End-to-end tests for the HTTPS paths of `ProviderClient` against a local
//! TLS listener.
//!
//! The listener terminates TLS with a self-signed test certificate and the
//! client runs in insecure mode, so the handshake succeeds without trust
//! material. Each server reports the full request (head and body) back to
//! the test, so header forwarding and body encoding are checked on the wire.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use contact_http::{ProviderClient, QueryMap, TrustConfig, WarningSink};

const TEST_CERT_PEM: &[u8] = include_bytes!("fixtures/test_ca.pem");
const TEST_KEY_PEM: &[u8] = include_bytes!("fixtures/test_key.pem");

fn tls_config() -> Arc<rustls::ServerConfig> {
    // May already be installed by another test; either way ring is the
    // provider used below.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let certs = rustls_pemfile::certs(&mut &TEST_CERT_PEM[..])
        .collect::<Result<Vec<_>, _>>()
        .expect("failed to parse test certificate");
    let key = rustls_pemfile::private_key(&mut &TEST_KEY_PEM[..])
        .expect("failed to parse test key")
        .expect("test key file holds no key");

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .expect("failed to build TLS server config");
    Arc::new(config)
}

/// Serves a single canned HTTPS response on an ephemeral port.
///
/// Returns the listener address and a channel carrying the full request the
/// client sent.
fn serve_tls_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind listener");
    let addr = listener.local_addr().expect("failed to get listener address");
    let (tx, rx) = mpsc::channel();
    let config = tls_config();

    thread::spawn(move || {
        let (stream, _) = listener.accept().expect("failed to accept connection");
        let conn = rustls::ServerConnection::new(config).expect("failed to create TLS session");
        let mut tls = rustls::StreamOwned::new(conn, stream);

        let request = read_request(&mut tls);
        let _ = tx.send(request);

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        tls.write_all(response.as_bytes())
            .expect("failed to write response");
    });

    (addr.to_string(), rx)
}

// Reads the request head plus Content-Length bytes of body.
fn read_request(stream: &mut impl Read) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = stream.read(&mut buf).expect("failed to read request");
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(head_end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&data[..head_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    let value = lower.strip_prefix("content-length:")?;
                    value.trim().parse::<usize>().ok()
                })
                .unwrap_or(0);
            if data.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).to_string()
}

#[test]
fn https_get_forwards_extra_headers() {
    let (host, requests) = serve_tls_once("200 OK", "ok");
    let client = ProviderClient::new(TrustConfig::insecure());

    let mut params = QueryMap::new();
    params.insert("fields".to_string(), Some("name".to_string()));
    let mut headers = HashMap::new();
    headers.insert("Authorization".to_string(), "Bearer token123".to_string());

    let body = client
        .https_get(&host, "/contacts", &params, &headers)
        .expect("GET against 200 TLS server should succeed");
    assert_eq!(body, "ok");

    let request = requests.recv().expect("server should report request");
    assert!(
        request.starts_with("GET /contacts?fields=name HTTP/1.1\r\n"),
        "unexpected request head: {request}"
    );
    assert!(
        request
            .to_ascii_lowercase()
            .contains("authorization: bearer token123"),
        "extra header not forwarded: {request}"
    );
}

#[test]
fn https_post_sends_form_encoded_body() {
    let (host, requests) = serve_tls_once("200 OK", "created");
    let client = ProviderClient::new(TrustConfig::insecure());

    let mut params = QueryMap::new();
    params.insert("code".to_string(), Some("abc".to_string()));

    let body = client
        .https_post(&host, "/token", &params)
        .expect("POST against 200 TLS server should succeed");
    assert_eq!(body, "created");

    let request = requests.recv().expect("server should report request");
    assert!(
        request.starts_with("POST /token HTTP/1.1\r\n"),
        "unexpected request head: {request}"
    );
    assert!(
        request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"),
        "form content type missing: {request}"
    );
    assert!(
        request.ends_with("\r\n\r\ncode=abc"),
        "encoded params not sent as body: {request}"
    );
}

#[test]
fn https_failure_carries_provider_body() {
    let (host, _requests) = serve_tls_once("401 Unauthorized", "token expired");
    let client = ProviderClient::new(TrustConfig::insecure());

    match client.https_get(&host, "/contacts", &QueryMap::new(), &HashMap::new()) {
        Err(contact_http::FetchError::Http { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "token expired");
        }
        other => panic!("expected HTTP failure, got {other:?}"),
    }
}

#[test]
fn insecure_https_call_warns_once_through_sink() {
    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl WarningSink for RecordingSink {
        fn warn(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    let (host, _requests) = serve_tls_once("200 OK", "ok");
    let sink = Arc::new(RecordingSink::default());
    let client = ProviderClient::new(TrustConfig::insecure())
        .with_warning_sink(Arc::clone(&sink) as Arc<dyn WarningSink>);

    client
        .https_get(&host, "/contacts", &QueryMap::new(), &HashMap::new())
        .expect("insecure TLS call should succeed");
    assert_eq!(sink.0.lock().unwrap().len(), 1);
}
