use mockito::{Matcher, Server};
use serde_json::json;

use fip_version_action::models::api::{PrepareRequest, VersionRequest};
use fip_version_action::services::action_client::{ActionBackend, ActionClient, ClientError};

fn version_request() -> VersionRequest {
    VersionRequest {
        project_uuid: "a1b2c3".to_string(),
        user_token: "secret".to_string(),
        version: "1.1.0".to_string(),
        description: "Minor update".to_string(),
    }
}

#[tokio::test]
async fn test_prepare_action_posts_session() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/prepare-action")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "projectUuid": "a1b2c3",
            "userToken": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "message": "Action is ready",
                "questionnaireVersion": "1.0.0",
                "submittedVersions": [
                    {"uri": "https://w3id.org/np/RA1", "version": "1.0.0", "submittedAt": "2024-01-10T08:00:00Z"},
                    {"uri": "https://w3id.org/np/RA2", "version": null, "submittedAt": null}
                ],
                "debug": {"replies": {}}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let response = client
        .prepare_action(&PrepareRequest {
            project_uuid: "a1b2c3".to_string(),
            user_token: "secret".to_string(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(response.ok);
    assert_eq!(response.questionnaire_version.as_deref(), Some("1.0.0"));
    assert_eq!(response.submitted_versions.len(), 2);
    assert!(response.debug.is_some());
}

#[tokio::test]
async fn test_save_version_posts_payload() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/save-version")
        .match_body(Matcher::Json(json!({
            "projectUuid": "a1b2c3",
            "userToken": "secret",
            "version": "1.1.0",
            "description": "Minor update"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true, "message": "Version 1.1.0 submitted successfully"}).to_string())
        .create_async()
        .await;

    let client = ActionClient::new(format!("{}/", server.url()));
    let response = client.save_version(&version_request()).await.unwrap();

    mock.assert_async().await;
    assert!(response.ok);
}

#[tokio::test]
async fn test_submit_version_parses_flags() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/submit-version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "message": "Version submitted successfully",
                "documentDone": true,
                "documentUuid": "d-1",
                "submissionDone": true,
                "submissionUuid": "s-1",
                "submissionLocation": "https://w3id.org/np/RAnew"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let response = client.submit_version(&version_request()).await.unwrap();

    mock.assert_async().await;
    assert!(response.is_submitted());
    assert!(response.is_document_generated());
    assert_eq!(response.submission_location.as_deref(), Some("https://w3id.org/np/RAnew"));
}

#[tokio::test]
async fn test_http_error_status() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/save-version")
        .with_status(500)
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let result = client.save_version(&version_request()).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ClientError::HttpStatus(500))));
}

#[tokio::test]
async fn test_malformed_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/submit-version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>proxy error</html>")
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let result = client.submit_version(&version_request()).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ClientError::ParseError(_))));
}
