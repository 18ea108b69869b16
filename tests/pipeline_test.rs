mod common;

use serde_json::json;
use tempfile::TempDir;

use common::{StubDiscord, TOKEN, cache_files, pipeline, png_bytes, start_server};
use emojibox::application::LoginRequest;
use emojibox::domain::errors::{AuthError, PipelineError};
use emojibox::domain::pipeline::{PipelineState, Stage};

fn request() -> LoginRequest {
    LoginRequest::new("user@example.com", "hunter2")
}

#[tokio::test]
async fn test_end_to_end_sync() {
    let (addr, stub) = start_server(
        StubDiscord::new()
            .with_guild(
                "1",
                "Test",
                json!([{ "id": "9", "name": "smile", "animated": false }]),
            )
            .with_image("9.png", png_bytes(10, 10)),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let report = pipeline.run(&request()).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Ready);
    assert_eq!(cache_files(dir.path()), vec!["9.png"]);
    assert_eq!(
        image::image_dimensions(dir.path().join("9.png")).unwrap(),
        (10, 10)
    );
    assert_eq!(report.downloaded, 1);
    assert!(!report.has_failures());

    let login = stub.login_requests.lock()[0].clone();
    assert_eq!(login["email"], "user@example.com");
    assert_eq!(login["password"], "hunter2");
    assert_eq!(login["undelete"], false);
    assert!(login["captcha_key"].is_null());

    assert!(stub.authorizations.lock().iter().all(|a| a == TOKEN));
}

#[tokio::test]
async fn test_community_order_follows_server() {
    let (addr, _stub) = start_server(
        StubDiscord::new()
            .with_guild("2", "Second", json!([]))
            .with_guild("1", "First", json!([])),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let report = pipeline.run(&request()).await.unwrap();

    let ids: Vec<_> = report.communities.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
    let session_ids: Vec<_> = pipeline
        .communities()
        .iter()
        .map(|c| c.id().as_str())
        .collect();
    assert_eq!(session_ids, vec!["2", "1"]);
}

#[tokio::test]
async fn test_rejected_login() {
    let (addr, stub) = start_server(StubDiscord::new().rejecting_login()).await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let result = pipeline.run(&request()).await;

    match result {
        Err(PipelineError::Auth(AuthError::Rejected { status, body })) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid Form Body"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        pipeline.state(),
        PipelineState::Failed {
            stage: Stage::Authenticating,
            ..
        }
    ));
    assert!(stub.authorizations.lock().is_empty());
}

#[tokio::test]
async fn test_mfa_challenge() {
    let (addr, _stub) = start_server(
        StubDiscord::new()
            .with_login_response(json!({ "token": null, "mfa": true, "ticket": "abc" })),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let result = pipeline.login(&request()).await;

    assert!(matches!(
        result,
        Err(PipelineError::Auth(AuthError::MfaRequired))
    ));
    assert!(!pipeline.session().is_authenticated());
}

#[tokio::test]
async fn test_oversize_emoji_is_shrunk() {
    let (addr, _stub) = start_server(
        StubDiscord::new()
            .with_guild(
                "1",
                "Test",
                json!([{ "id": "9", "name": "wide", "animated": false }]),
            )
            .with_image("9.png", png_bytes(100, 40)),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let report = pipeline.run(&request()).await.unwrap();

    assert_eq!(report.normalize.static_images.resized.len(), 1);
    assert_eq!(
        image::image_dimensions(dir.path().join("9.png")).unwrap(),
        (50, 20)
    );
}

#[tokio::test]
async fn test_missing_image_is_recorded_and_skipped() {
    let (addr, _stub) = start_server(
        StubDiscord::new()
            .with_guild(
                "1",
                "Test",
                json!([
                    { "id": "8", "name": "gone", "animated": false },
                    { "id": "9", "name": "smile", "animated": false }
                ]),
            )
            .with_image("9.png", png_bytes(10, 10)),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let report = pipeline.run(&request()).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Ready);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].emoji.id().as_str(), "8");
    assert_eq!(report.failed[0].error.status(), Some(404));
    assert_eq!(cache_files(dir.path()), vec!["9.png"]);
}

#[tokio::test]
async fn test_second_sync_hits_cache() {
    let (addr, stub) = start_server(
        StubDiscord::new()
            .with_guild(
                "1",
                "Test",
                json!([{ "id": "9", "name": "smile", "animated": false }]),
            )
            .with_image("9.png", png_bytes(10, 10)),
    )
    .await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    pipeline.run(&request()).await.unwrap();
    let second = pipeline.run(&request()).await.unwrap();

    assert_eq!(second.already_cached, 1);
    assert_eq!(stub.cdn_requests.lock().len(), 1);
    assert_eq!(stub.login_requests.lock().len(), 1);
}

#[tokio::test]
async fn test_manual_add_uses_cdn_only() {
    let (addr, stub) =
        start_server(StubDiscord::new().with_image("123.png", png_bytes(64, 64))).await;
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline(addr, dir.path()).await;

    let result = pipeline.add_manual_emoji("123", false).await.unwrap();

    assert_eq!(result.path, dir.path().join("123.png"));
    assert_eq!(image::image_dimensions(&result.path).unwrap(), (50, 50));
    assert_eq!(pipeline.state(), PipelineState::Ready);
    assert!(pipeline.communities()[0].is_extra());
    assert!(stub.login_requests.lock().is_empty());
    assert!(stub.authorizations.lock().is_empty());
}
