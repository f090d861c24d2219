use anyhow::Result;
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use ucare_core::ErrorKind;
use ucare_upload::{compute_signature, MultipartSession, StartMultipart};

use super::mock::{init_client, MockHttpSend};

#[tokio::test]
async fn test_multipart_upload() -> Result<()> {
    let http = MockHttpSend::new()
        .ok(json!({
            "uuid": "UUID-MP",
            "parts": ["https://s3.example.com/part1", "https://s3.example.com/part2"],
        }))
        .respond(StatusCode::OK, "")
        .respond(StatusCode::OK, "")
        .ok(json!({"uuid": "UUID-MP", "is_ready": true}));
    let client = init_client(&http, None);

    let session = client
        .start_multipart(StartMultipart::new("movie.mp4", 20 * 1024 * 1024))
        .await?;
    assert_eq!(
        session,
        MultipartSession {
            uuid: "UUID-MP".to_string(),
            parts: vec![
                "https://s3.example.com/part1".to_string(),
                "https://s3.example.com/part2".to_string(),
            ],
        }
    );

    for (n, url) in session.parts.iter().enumerate() {
        client
            .upload_part(url, vec![n as u8; 4], "video/mp4")
            .await?;
    }
    let done = client.complete_multipart(&session.uuid).await?;
    assert_eq!(done["is_ready"], true);

    let reqs = http.requests();
    assert_eq!(reqs.len(), 4);

    assert_eq!(reqs[0].path(), "/multipart/start/");
    assert_eq!(
        reqs[0].form(),
        vec![
            ("UPLOADCARE_PUB_KEY".to_string(), "demopublickey".to_string()),
            ("filename".to_string(), "movie.mp4".to_string()),
            ("size".to_string(), "20971520".to_string()),
            ("content_type".to_string(), "video/mp4".to_string()),
        ]
    );

    assert_eq!(reqs[1].method, Method::PUT);
    assert_eq!(reqs[1].uri, "https://s3.example.com/part1");
    assert_eq!(reqs[1].content_type.as_deref(), Some("video/mp4"));
    assert_eq!(reqs[1].body.as_ref(), &[0u8, 0, 0, 0]);
    assert_eq!(reqs[2].uri, "https://s3.example.com/part2");
    assert_eq!(reqs[2].body.as_ref(), &[1u8, 1, 1, 1]);

    assert_eq!(reqs[3].path(), "/multipart/complete/");
    assert_eq!(
        reqs[3].form(),
        vec![
            ("UPLOADCARE_PUB_KEY".to_string(), "demopublickey".to_string()),
            ("uuid".to_string(), "UUID-MP".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_start_multipart_signed() -> Result<()> {
    let http = MockHttpSend::new().ok(json!({"uuid": "U1", "parts": []}));
    let client = init_client(&http, Some("demosecretkey"));

    client
        .start_multipart(
            StartMultipart::new("data.bin", 11 * 1024 * 1024)
                .with_content_type("application/x-custom")
                .with_expire(4070908800_i64),
        )
        .await?;

    let req = &http.requests()[0];
    assert_eq!(
        req.field("content_type").as_deref(),
        Some("application/x-custom")
    );
    assert_eq!(req.field("expire").as_deref(), Some("4070908800"));
    assert_eq!(
        req.field("signature"),
        Some(compute_signature("demosecretkey", 4070908800))
    );
    Ok(())
}

#[tokio::test]
async fn test_start_multipart_requires_expire() {
    let http = MockHttpSend::new();
    let client = init_client(&http, Some("demosecretkey"));

    let err = client
        .start_multipart(StartMultipart::new("movie.mp4", 20 * 1024 * 1024))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingExpire);
    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_start_multipart_malformed_response() {
    let http = MockHttpSend::new().ok(json!({"uuid": "U1"}));
    let client = init_client(&http, None);

    let err = client
        .start_multipart(StartMultipart::new("movie.mp4", 20 * 1024 * 1024))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_upload_part_rejected() {
    let http = MockHttpSend::new().respond(StatusCode::FORBIDDEN, "<Error>AccessDenied</Error>");
    let client = init_client(&http, None);

    let err = client
        .upload_part("https://s3.example.com/part1", b"DATA".to_vec(), "video/mp4")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(err.message(), "<Error>AccessDenied</Error>");
}
