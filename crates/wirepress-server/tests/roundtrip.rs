//! Round-trip tests against real ephemeral servers
//!
//! The reqwest client here is built without any decompression features, so
//! response bodies arrive exactly as sent on the wire.

use bytes::Bytes;
use wirepress_compression::CompressionConfig;
use wirepress_core::Codec;
use wirepress_server::EphemeralServer;

fn compressible_payload() -> Bytes {
    Bytes::from("The quick brown fox jumps over the lazy dog. ".repeat(2000))
}

fn raw_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_gzip()
        .no_deflate()
        .no_brotli()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_gzip_roundtrip() {
    let payload = compressible_payload();
    let server = EphemeralServer::start(
        Codec::Gzip,
        payload.clone(),
        CompressionConfig::default(),
    )
    .await
    .unwrap();

    let response = raw_client()
        .get(server.route_url())
        .header(reqwest::header::ACCEPT_ENCODING, "gzip")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok()),
        Some("gzip")
    );
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok()),
        Some("no-store")
    );

    let body = response.bytes().await.unwrap();
    assert!(body.len() < payload.len());

    server.shutdown().await;
}

#[tokio::test]
async fn test_no_accept_encoding_means_no_compression() {
    let payload = compressible_payload();
    let server = EphemeralServer::start(
        Codec::Brotli,
        payload.clone(),
        CompressionConfig::default(),
    )
    .await
    .unwrap();

    let response = raw_client().get(server.route_url()).send().await.unwrap();

    assert!(response
        .headers()
        .get(reqwest::header::CONTENT_ENCODING)
        .is_none());

    let body = response.bytes().await.unwrap();
    assert_eq!(body, payload);

    server.shutdown().await;
}

#[tokio::test]
async fn test_mismatched_accept_encoding_passes_through() {
    // Server offers brotli only; client accepts gzip only. The server must
    // never apply a coding the client did not advertise.
    let payload = compressible_payload();
    let server = EphemeralServer::start(
        Codec::Brotli,
        payload.clone(),
        CompressionConfig::default(),
    )
    .await
    .unwrap();

    let response = raw_client()
        .get(server.route_url())
        .header(reqwest::header::ACCEPT_ENCODING, "gzip")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(reqwest::header::CONTENT_ENCODING)
        .is_none());
    assert_eq!(response.bytes().await.unwrap(), payload);

    server.shutdown().await;
}

#[tokio::test]
async fn test_identity_control_run() {
    let payload = compressible_payload();
    let server = EphemeralServer::start(
        Codec::Identity,
        payload.clone(),
        CompressionConfig::default(),
    )
    .await
    .unwrap();

    let response = raw_client()
        .get(server.route_url())
        .header(reqwest::header::ACCEPT_ENCODING, "identity")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(reqwest::header::CONTENT_ENCODING)
        .is_none());
    assert_eq!(response.bytes().await.unwrap(), payload);

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = EphemeralServer::start(
        Codec::Gzip,
        Bytes::from("x"),
        CompressionConfig::default(),
    )
    .await
    .unwrap();

    let url = format!("http://{}/other", server.addr());
    let response = raw_client().get(url).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    server.shutdown().await;
}
