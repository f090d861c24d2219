use std::time::Duration;

use anyhow::Result;
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use ucare_core::ErrorKind;
use ucare_upload::{compute_signature, Store, Upload};

use super::mock::{init_client, init_client_with_interval, MockHttpSend};

#[tokio::test]
async fn test_upload_local_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("photo.jpg");
    tokio::fs::write(&path, b"JPEG DATA").await?;

    let http = MockHttpSend::new().ok(json!({"file": "UUID123"}));
    let client = init_client(&http, None);

    let url = client
        .upload(Upload::new(path.to_string_lossy()).with_metadata("subsystem", "avatars"))
        .await?;
    assert_eq!(url, "https://ucarecdn.com/UUID123/photo.jpg");

    let reqs = http.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, Method::POST);
    assert_eq!(reqs[0].path(), "/base/");
    assert!(reqs[0]
        .content_type
        .as_deref()
        .unwrap_or_default()
        .starts_with("multipart/form-data; boundary="));

    let body = reqs[0].body_text();
    assert!(body.contains("name=\"UPLOADCARE_PUB_KEY\"\r\n\r\ndemopublickey\r\n"));
    assert!(body.contains("name=\"UPLOADCARE_STORE\"\r\n\r\nauto\r\n"));
    assert!(body.contains("name=\"metadata[subsystem]\"\r\n\r\navatars\r\n"));
    assert!(body.contains("name=\"file\"; filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nJPEG DATA\r\n"));
    assert!(!body.contains("name=\"pub_key\""));
    Ok(())
}

#[tokio::test]
async fn test_upload_url_with_fetch_token() -> Result<()> {
    let http = MockHttpSend::new()
        .ok(json!({"type": "token", "token": "TOKEN1"}))
        .ok(json!({"status": "success", "filename": "pic.png", "uuid": "UUID456"}));
    let client = init_client(&http, None);

    let url = client
        .upload(
            Upload::new("http://example.com/pic.png")
                .with_store(Store::Stored)
                .with_field("pub_key", "forged")
                .with_field("check_URL_duplicates", "1"),
        )
        .await?;
    assert_eq!(url, "https://ucarecdn.com/UUID456/pic.png");

    let reqs = http.requests();
    assert_eq!(reqs.len(), 2);

    assert_eq!(reqs[0].path(), "/from_url/");
    assert_eq!(
        reqs[0].content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        reqs[0].form(),
        vec![
            ("pub_key".to_string(), "demopublickey".to_string()),
            ("UPLOADCARE_STORE".to_string(), "1".to_string()),
            (
                "source_url".to_string(),
                "http://example.com/pic.png".to_string()
            ),
            ("check_URL_duplicates".to_string(), "1".to_string()),
        ]
    );

    assert_eq!(reqs[1].path(), "/from_url/status/");
    assert_eq!(reqs[1].field("token").as_deref(), Some("TOKEN1"));
    Ok(())
}

#[tokio::test]
async fn test_upload_url_resolved_synchronously() -> Result<()> {
    let http = MockHttpSend::new().ok(json!({"filename": "pic.png", "uuid": "UUID789"}));
    let client = init_client(&http, None);

    let outcome = client
        .upload_outcome(Upload::new("https://example.com/pic.png"))
        .await?;
    assert_eq!(outcome.uuid, "UUID789");
    assert_eq!(outcome.filename, "pic.png");
    assert_eq!(http.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_secure_upload_requires_expire() {
    let http = MockHttpSend::new();
    let client = init_client(&http, Some("demosecretkey"));

    let err = client
        .upload(Upload::new("http://example.com/pic.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingExpire);
    assert!(err.is_config_error());
    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_secure_upload_is_signed() -> Result<()> {
    let http = MockHttpSend::new().ok(json!({"filename": "pic.png", "uuid": "UUID1"}));
    let client = init_client(&http, Some("demosecretkey"));

    client
        .upload(Upload::new("http://example.com/pic.png").with_expire("2099-01-01T00:00:00Z"))
        .await?;

    let req = &http.requests()[0];
    assert_eq!(req.field("expire").as_deref(), Some("4070908800"));
    assert_eq!(
        req.field("signature"),
        Some(compute_signature("demosecretkey", 4070908800))
    );
    Ok(())
}

#[tokio::test]
async fn test_secure_upload_rejects_bad_expire() {
    let http = MockHttpSend::new();
    let client = init_client(&http, Some("demosecretkey"));

    let err = client
        .upload(Upload::new("http://example.com/pic.png").with_expire("not a date"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidDatetime);

    let err = client
        .upload(Upload::new("http://example.com/pic.png").with_expire(1_000_i64))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_expire_without_secret_key() {
    let http = MockHttpSend::new();
    let client = init_client(&http, None);

    let err = client
        .upload(Upload::new("http://example.com/pic.png").with_expire(4070908800_i64))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSecretKey);
    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_server_requires_signature() {
    let http = MockHttpSend::new().respond(
        StatusCode::BAD_REQUEST,
        r#"{"error": {"content": "`signature` is required.", "status_code": 400}}"#,
    );
    let client = init_client(&http, None);

    let err = client
        .upload(Upload::new("http://example.com/pic.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSecretKey);
}

#[tokio::test]
async fn test_upload_invalid_input() {
    let http = MockHttpSend::new();
    let client = init_client(&http, None);

    let err = client
        .upload(Upload::new("definitely/not/a/file.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.is_input_error());
    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_poll_until_success() -> Result<()> {
    let http = MockHttpSend::new()
        .ok(json!({"status": "pending"}))
        .ok(json!({"status": "progress", "done": 512, "total": 1024}))
        .ok(json!({"status": "success", "filename": "a.png", "uuid": "U1"}));
    let client = init_client(&http, None);

    let outcome = client
        .check_status("TOKEN1", &CancellationToken::new())
        .await?;
    assert_eq!(outcome.filename, "a.png");
    assert_eq!(outcome.uuid, "U1");
    assert_eq!(http.count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_poll_error_fails_immediately() {
    let http = MockHttpSend::new().ok(json!({"status": "error", "error": "host unreachable"}));
    let client = init_client(&http, None);

    let err = client
        .check_status("TOKEN1", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(err.message().contains("host unreachable"));
    assert_eq!(http.count(), 1);
}

#[tokio::test]
async fn test_poll_unknown_fails() {
    let http = MockHttpSend::new()
        .ok(json!({"status": "pending"}))
        .ok(json!({"status": "unknown"}));
    let client = init_client(&http, None);

    let err = client
        .check_status("TOKEN1", &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(http.count(), 2);
}

#[tokio::test]
async fn test_poll_cancelled_while_waiting() {
    let http = MockHttpSend::new()
        .ok(json!({"type": "token", "token": "TOKEN1"}))
        .ok(json!({"status": "pending"}));
    let client = init_client_with_interval(&http, None, Duration::from_secs(60));

    let cancel = CancellationToken::new();
    let c = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        c.cancel();
    });

    let err = tokio::time::timeout(
        Duration::from_secs(5),
        client.upload(Upload::new("http://example.com/pic.png").with_cancel(cancel)),
    )
    .await
    .expect("cancellation must stop the poll loop")
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(http.count(), 2);
}

#[tokio::test]
async fn test_poll_already_cancelled() {
    let http = MockHttpSend::new();
    let client = init_client(&http, None);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client.check_status("TOKEN1", &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(http.count(), 0);
}

#[tokio::test]
async fn test_secure_local_upload_is_signed() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("photo.jpg");
    tokio::fs::write(&path, b"JPEG DATA").await?;

    let http = MockHttpSend::new().ok(json!({"file": "UUID123"}));
    let client = init_client(&http, Some("demosecretkey"));

    let url = client
        .upload(
            Upload::new(path.to_string_lossy())
                .with_expire(4070908800_i64)
                .with_field("signature", "forged"),
        )
        .await?;
    assert_eq!(url, "https://ucarecdn.com/UUID123/photo.jpg");

    let req = &http.requests()[0];
    assert_eq!(req.path(), "/base/");
    let body = req.body_text();
    assert!(body.contains("name=\"expire\"\r\n\r\n4070908800\r\n"));
    assert!(body.contains(&format!(
        "name=\"signature\"\r\n\r\n{}\r\n",
        compute_signature("demosecretkey", 4070908800)
    )));
    assert!(!body.contains("forged"));
    Ok(())
}

#[tokio::test]
async fn test_upload_url_longer_than_path_limit() -> Result<()> {
    let http = MockHttpSend::new().ok(json!({"filename": "pic.png", "uuid": "U9"}));
    let client = init_client(&http, None);

    let source = format!(
        "https://example.com/pic.png?X-Amz-Signature={}",
        "a".repeat(5000)
    );
    let url = client.upload(Upload::new(source.as_str())).await?;
    assert_eq!(url, "https://ucarecdn.com/U9/pic.png");
    assert_eq!(http.requests()[0].field("source_url"), Some(source));
    Ok(())
}
