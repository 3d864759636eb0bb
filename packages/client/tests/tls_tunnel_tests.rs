//! CONNECT tunnels carrying a real TLS session to a local HTTPS server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use proxyprobe_client::verify::outcome::NOTE_WORKING;
use proxyprobe_client::{CheckerConfig, Kind, ProxyChecker};
use rcgen::{CertificateParams, KeyPair};
use rustls::ServerConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_rustls::TlsAcceptor;

struct TestCert {
    pem: String,
    der: CertificateDer<'static>,
    key: Vec<u8>,
}

fn localhost_cert() -> TestCert {
    let params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    let key_pair = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key_pair).unwrap();
    TestCert {
        pem: cert.pem(),
        der: cert.der().clone(),
        key: key_pair.serialize_der(),
    }
}

async fn read_head<S: tokio::io::AsyncRead + Unpin>(stream: &mut S) -> String {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    while !buf.ends_with(b"\r\n\r\n") {
        match stream.read(&mut byte).await {
            Ok(1) => buf.push(byte[0]),
            _ => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// HTTPS origin that answers every request with a JSON IP body.
async fn https_origin(cert: &TestCert) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let config = ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(
            vec![cert.der.clone()],
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(cert.key.clone())),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((tcp, _)) = listener.accept().await {
            let Ok(mut tls) = acceptor.accept(tcp).await else {
                continue;
            };
            let _ = tx.send(read_head(&mut tls).await);
            let _ = tls
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"ip\":\"9.9.9.9\"}")
                .await;
            let _ = tls.shutdown().await;
        }
    });

    (addr, rx)
}

/// CONNECT proxy that tunnels every request to `upstream`, whatever it asks for.
async fn tunnelling_proxy(upstream: SocketAddr) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut client, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let _ = tx.send(read_head(&mut client).await);
                let Ok(mut server) = TcpStream::connect(upstream).await else {
                    return;
                };
                if client
                    .write_all(b"HTTP/1.1 200 Connection established\r\n\r\n")
                    .await
                    .is_err()
                {
                    return;
                }
                let _ = tokio::io::copy_bidirectional(&mut client, &mut server).await;
            });
        }
    });

    (addr, rx)
}

fn checker_trusting(cert: &TestCert) -> ProxyChecker {
    let config = CheckerConfig::default()
        .with_native_certs(false)
        .with_root_certificate_pem(cert.pem.clone())
        .with_timeout(Duration::from_secs(5));
    ProxyChecker::new(config).unwrap()
}

#[tokio::test]
async fn test_https_through_tunnel() {
    let cert = localhost_cert();
    let (origin, mut origin_requests) = https_origin(&cert).await;
    let (proxy, mut proxy_requests) = tunnelling_proxy(origin).await;

    let url = format!("https://localhost:{}/?format=json", origin.port());
    let result = checker_trusting(&cert)
        .verify(&format!("user:pass@{proxy}"), Some(&url))
        .await
        .unwrap();

    assert!(result.working(), "error: {:?}", result.error());
    assert_eq!(result.status_code(), 200);
    assert_eq!(result.external_ip(), Some("9.9.9.9"));
    assert_eq!(result.note(), NOTE_WORKING);

    let timings = result.timings();
    assert!(timings.connect_ms().is_some());
    assert!(timings.tunnel_ms().is_some());
    assert!(timings.tls_ms().unwrap() <= timings.total_ms());
    assert!(timings.tunnel_ms().unwrap() <= timings.total_ms());

    let connect = proxy_requests.recv().await.unwrap();
    let authority = format!("localhost:{}", origin.port());
    assert!(connect.starts_with(&format!("CONNECT {authority} HTTP/1.1\r\nHost: {authority}\r\n")));
    assert!(connect.contains("Proxy-Authorization: Basic dXNlcjpwYXNz\r\n"));

    let get = origin_requests.recv().await.unwrap();
    assert!(get.starts_with("GET /?format=json HTTP/1.1\r\n"));
    assert!(get.contains(&format!("\r\nHost: {authority}\r\n")));
    assert!(!get.contains("Proxy-Authorization"));
}

#[tokio::test]
async fn test_certificate_name_mismatch() {
    let cert = localhost_cert();
    let (origin, _origin_requests) = https_origin(&cert).await;
    let (proxy, _proxy_requests) = tunnelling_proxy(origin).await;

    // The certificate only covers "localhost"
    let url = format!("https://127.0.0.1:{}/", origin.port());
    let result = checker_trusting(&cert)
        .verify(&proxy.to_string(), Some(&url))
        .await
        .unwrap();

    assert!(!result.working());
    assert_eq!(result.status_code(), 0);
    assert_eq!(result.error_kind(), Some(&Kind::TlsHandshake));
    assert!(result.timings().tunnel_ms().is_some());
    assert!(result.timings().tls_ms().is_none());
}

#[tokio::test]
async fn test_untrusted_certificate() {
    let cert = localhost_cert();
    let other = localhost_cert();
    let (origin, _origin_requests) = https_origin(&cert).await;
    let (proxy, _proxy_requests) = tunnelling_proxy(origin).await;

    let url = format!("https://localhost:{}/", origin.port());
    let result = checker_trusting(&other)
        .verify(&proxy.to_string(), Some(&url))
        .await
        .unwrap();

    assert!(!result.working());
    assert_eq!(result.error_kind(), Some(&Kind::TlsHandshake));
}
