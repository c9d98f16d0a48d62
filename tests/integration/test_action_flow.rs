// End-to-end flows: controller + HTTP client against a mock backend

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use fip_version_action::models::session::UiState;
use fip_version_action::services::action_client::ActionClient;
use fip_version_action::services::controller::ActionController;
use fip_version_action::services::host::ConsoleHost;
use fip_version_action::utils::version::BumpKind;

async fn mock_prepare(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/prepare-action")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "questionnaireVersion": "2.0.0",
                "submittedVersions": [
                    {"uri": "https://w3id.org/np/RA1", "version": "1.0.0"},
                    {"uri": "https://w3id.org/np/RA2", "version": "2.0.0"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await
}

#[tokio::test]
async fn test_submit_flow_with_submission() {
    let mut server = Server::new_async().await;
    let prepare = mock_prepare(&mut server).await;
    let submit = server
        .mock("POST", "/api/submit-version")
        .match_body(Matcher::PartialJson(json!({"version": "2.1.0", "description": "New principles"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"ok": true, "submissionDone": true, "submissionLocation": "http://x"}).to_string(),
        )
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let mut controller = ActionController::new(client, ConsoleHost::new("p-1", "t-1"));

    assert_eq!(controller.initialize().await.unwrap(), UiState::Ready);
    assert_eq!(controller.view().latest_version_text, "2.0.0");
    assert!(!controller.view().submit_enabled);

    controller.click_suggestion(BumpKind::Minor);
    controller.change_description("New principles");
    assert_eq!(controller.submit().await, UiState::Done);

    prepare.assert_async().await;
    submit.assert_async().await;

    let host = controller.into_host();
    let result = host.result().unwrap();
    assert!(result.success);
    assert!(result.message.contains("2.1.0"));
    assert!(result.message.contains("http://x"));
}

#[tokio::test]
async fn test_submit_flow_document_only() {
    let mut server = Server::new_async().await;
    let _prepare = mock_prepare(&mut server).await;
    let _submit = server
        .mock("POST", "/api/submit-version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true, "documentDone": true}).to_string())
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let mut controller = ActionController::new(client, ConsoleHost::new("p-1", "t-1"));
    controller.initialize().await.unwrap();
    controller.click_suggestion(BumpKind::Major);

    assert_eq!(controller.submit().await, UiState::Done);
    let host = controller.into_host();
    let result = host.result().unwrap();
    assert!(!result.success);
    assert!(result.message.contains("3.0.0"));
    assert!(result.message.contains("could not be submitted"));
}

#[tokio::test]
async fn test_save_flow_server_error_then_retry() {
    let mut server = Server::new_async().await;
    let _prepare = mock_prepare(&mut server).await;
    let failing = server
        .mock("POST", "/api/save-version")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = ActionClient::new(server.url());
    let mut controller = ActionController::new(client, ConsoleHost::new("p-1", "t-1"));
    controller.initialize().await.unwrap();
    controller.click_suggestion(BumpKind::Patch);

    assert_eq!(controller.confirm().await, UiState::Ready);
    failing.assert_async().await;
    assert!(controller.view().error_visible);
    assert!(controller.host().result().is_none());

    failing.remove_async().await;
    let _ok = server
        .mock("POST", "/api/save-version")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true}).to_string())
        .create_async()
        .await;

    assert_eq!(controller.confirm().await, UiState::Done);
    let host = controller.into_host();
    let result = host.result().unwrap();
    assert!(result.success);
    assert!(result.message.contains("**2.0.1**"));
}
