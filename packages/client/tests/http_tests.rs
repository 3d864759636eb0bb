use std::time::Duration;

use proxyprobe_client::auth::{decode_basic_auth, encode_basic_auth, proxy_authorization_line};
use proxyprobe_client::connect::Deadline;
use proxyprobe_client::http::{
    HEADER_DELIMITER, RawResponse, ResponseLimits, build_connect_request, build_plain_request,
    build_tunneled_request, parse_status_and_headers, read_response, read_until,
};
use proxyprobe_client::{Kind, ProxyDescriptor, TargetDescriptor};
use tokio_test::io::Builder;

fn limits(max_header_bytes: usize, max_body_bytes: usize) -> ResponseLimits {
    ResponseLimits {
        max_header_bytes,
        max_body_bytes,
        read_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_read_until_delimiter_split_across_reads() {
    let mut mock = Builder::new()
        .read(b"HTTP/1.1 200 OK\r\nX-A: b\r")
        .read(b"\n\r\nbody")
        .build();

    let frame = read_until(&mut mock, HEADER_DELIMITER, 1024, Deadline::after(Duration::from_secs(5)))
        .await
        .unwrap();

    assert_eq!(&frame.head[..], b"HTTP/1.1 200 OK\r\nX-A: b\r\n\r\n");
    assert_eq!(&frame.tail[..], b"body");
}

#[tokio::test]
async fn test_read_until_over_cap_without_delimiter() {
    let mut mock = Builder::new().read(&[b'a'; 64]).build();

    let err = read_until(&mut mock, HEADER_DELIMITER, 32, Deadline::after(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &Kind::HeadersTooLarge);
}

#[tokio::test]
async fn test_read_until_delimiter_past_cap() {
    let mut mock = Builder::new().read(b"0123456789\r\n\r\n").build();

    let err = read_until(&mut mock, HEADER_DELIMITER, 12, Deadline::after(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &Kind::HeadersTooLarge);
}

#[tokio::test]
async fn test_read_until_peer_closes_early() {
    let mut mock = Builder::new().read(b"HTTP/1.1 200").build();

    let err = read_until(&mut mock, HEADER_DELIMITER, 1024, Deadline::after(Duration::from_secs(5)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &Kind::Network);
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_read_until_deadline() {
    let (mut client, _server) = tokio::io::duplex(64);

    let err = read_until(&mut client, HEADER_DELIMITER, 1024, Deadline::after(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &Kind::ReadTimeout);
    assert!(err.is_timeout());
}

#[test]
fn test_parse_status_and_headers() {
    let head = parse_status_and_headers(
        b"HTTP/1.1 407 Proxy Authentication Required\r\n\
          Proxy-Authenticate: Basic realm=\"proxy\"\r\n\
          X-Dup: 1\r\n\
          x-dup:   2  \r\n\
          no-colon-line\r\n\r\n",
    );

    assert_eq!(head.status_code, 407);
    assert_eq!(head.status_text, "Proxy Authentication Required");
    assert_eq!(head.header("Proxy-Authenticate"), Some("Basic realm=\"proxy\""));
    assert_eq!(head.header("X-DUP"), Some("2"));
    assert!(head.header("no-colon-line").is_none());
}

#[test]
fn test_parse_status_variants() {
    let head = parse_status_and_headers(b"HTTP/2 200\r\n\r\n");
    assert_eq!(head.status_code, 200);
    assert_eq!(head.status_text, "");

    let head = parse_status_and_headers(b"http/1.0 503 Service Unavailable\r\n\r\n");
    assert_eq!(head.status_code, 503);

    let head = parse_status_and_headers(b"HTTP/1.1 2000 OK\r\n\r\n");
    assert_eq!(head.status_code, 0);

    let head = parse_status_and_headers(b"HTTP/1.1 200OK\r\n\r\n");
    assert_eq!(head.status_code, 0);

    let head = parse_status_and_headers(b"HTTP/1.1 204   No Content\r\n\r\n");
    assert_eq!(head.status_code, 204);
    assert_eq!(head.status_text, "No Content");

    let head = parse_status_and_headers(b"SSH-2.0-OpenSSH_9.6\r\n\r\n");
    assert_eq!(head.status_code, 0);
    assert_eq!(head.status_text, "");
}

#[test]
fn test_plain_request_is_absolute_form() {
    let proxy = ProxyDescriptor::parse("user:pass@proxy.test:3128").unwrap();
    let target = TargetDescriptor::parse("http://example.test/ip").unwrap();

    let request = build_plain_request(&proxy, &target, "ProxyProbe/0.1");

    assert!(request.starts_with("GET http://example.test/ip HTTP/1.1\r\n"));
    assert!(request.contains("\r\nHost: example.test\r\n"));
    assert!(request.contains("\r\nProxy-Authorization: Basic dXNlcjpwYXNz\r\n"));
    assert!(request.contains("\r\nUser-Agent: ProxyProbe/0.1\r\n"));
    assert!(request.contains("\r\nAccept-Encoding: identity\r\n"));
    assert!(request.ends_with("Connection: close\r\n\r\n"));
}

#[test]
fn test_tunneled_request_is_origin_form_without_auth() {
    let target = TargetDescriptor::parse("https://api.ipify.org:8443/?format=json").unwrap();

    let request = build_tunneled_request(&target, "ua");

    assert!(request.starts_with("GET /?format=json HTTP/1.1\r\nHost: api.ipify.org:8443\r\n"));
    assert!(!request.contains("Proxy-Authorization"));
}

#[test]
fn test_connect_request() {
    let proxy = ProxyDescriptor::parse("user:pass@proxy.test:3128").unwrap();
    let target = TargetDescriptor::parse("https://api.ipify.org?format=json").unwrap();

    let request = build_connect_request(&proxy, &target);

    assert!(request.starts_with("CONNECT api.ipify.org:443 HTTP/1.1\r\nHost: api.ipify.org:443\r\n"));
    assert!(request.contains("\r\nProxy-Authorization: Basic dXNlcjpwYXNz\r\n"));
    assert!(request.ends_with("\r\n\r\n"));
    assert!(!request.contains("format=json"));
}

#[test]
fn test_basic_auth_helpers() {
    assert_eq!(encode_basic_auth("user", "pass"), "dXNlcjpwYXNz");
    assert_eq!(
        proxy_authorization_line("user", "pass"),
        "Proxy-Authorization: Basic dXNlcjpwYXNz"
    );
    assert_eq!(
        decode_basic_auth("Basic dXNlcjpwYXNz").unwrap(),
        ("user".to_string(), "pass".to_string())
    );
    assert!(decode_basic_auth("%%%").is_err());
}

#[tokio::test]
async fn test_read_response_collects_body_until_eof() {
    let mut mock = Builder::new()
        .read(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n203.0.1")
        .read(b"13.9\n")
        .build();

    let response = read_response(&mut mock, &limits(1024, 1024)).await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.status_text, "OK");
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.body, b"203.0.113.9\n");
    assert_eq!(response.bytes_read, 12);
    assert_eq!(response.preview(2000), "203.0.113.9");
    assert!(response.is_success());
}

#[tokio::test]
async fn test_read_response_caps_body() {
    let mut mock = Builder::new()
        .read(b"HTTP/1.1 200 OK\r\n\r\nabcdefgh")
        .build();

    let response = read_response(&mut mock, &limits(1024, 4)).await.unwrap();

    assert_eq!(response.body, b"abcd");
    assert_eq!(response.bytes_read, 4);
}

#[tokio::test]
async fn test_read_response_body_timeout_is_not_an_error() {
    let (mut client, mut server) = tokio::io::duplex(1024);
    tokio::io::AsyncWriteExt::write_all(&mut server, b"HTTP/1.1 204 No Content\r\n\r\npartial")
        .await
        .unwrap();

    let limits = ResponseLimits {
        max_header_bytes: 1024,
        max_body_bytes: 1024,
        read_timeout: Duration::from_millis(50),
    };
    let response = read_response(&mut client, &limits).await.unwrap();

    assert_eq!(response.status_code, 204);
    assert_eq!(response.body, b"partial");
    drop(server);
}

#[test]
fn test_success_range_and_preview() {
    let response = |status_code: u16, body: &str| RawResponse {
        status_code,
        status_text: String::new(),
        headers: Default::default(),
        body: body.as_bytes().to_vec(),
        bytes_read: body.len(),
    };

    assert!(response(200, "").is_success());
    assert!(response(302, "").is_success());
    assert!(!response(199, "").is_success());
    assert!(!response(404, "").is_success());
    assert!(!response(0, "").is_success());

    assert_eq!(response(200, "héllo").preview(2), "hé");
    assert_eq!(response(200, "  padded  ").preview(100), "padded");
}
