use marketing_cloud::{domain::EmailDefinition, email::EmailClientError};
use serde_json::json;
use wiremock::{
    matchers::{any, body_json, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{spawn_app, unreachable_email_client};

fn definition() -> EmailDefinition {
    EmailDefinition {
        definition_key: "def1".into(),
        name: "Welcome".into(),
        description: "Sent after sign-up".into(),
        customer_key: "432a987f-ab01-012a-0123-0a01a0a0ab01".into(),
        subscription_list: "ALL_SUBSCRIBERS".into(),
        data_extension: "DE_1".into(),
    }
}

#[tokio::test]
async fn check_returns_true_when_the_definition_exists() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    Mock::given(path("/messaging/v1/email/definitions/DE_1"))
        .and(method("GET"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"definitionKey": "DE_1"})))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    assert!(app.email_client.check_email_definition(&session, "DE_1").await);
}

#[tokio::test]
async fn check_returns_false_for_a_404() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    Mock::given(path("/messaging/v1/email/definitions/DE_1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    assert!(!app.email_client.check_email_definition(&session, "DE_1").await);
}

#[tokio::test]
async fn check_returns_false_for_every_status_other_than_200() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    for status in [201, 202, 204, 301, 400, 401, 403, 404, 409, 429, 500, 503] {
        let guard = Mock::given(path("/messaging/v1/email/definitions/DE_1"))
            .respond_with(ResponseTemplate::new(status))
            .mount_as_scoped(&app.marketing_cloud)
            .await;

        assert!(
            !app.email_client.check_email_definition(&session, "DE_1").await,
            "a {} was read as found",
            status
        );
        drop(guard);
    }
}

#[tokio::test]
async fn check_returns_false_when_the_api_is_unreachable() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    assert!(
        !unreachable_email_client()
            .check_email_definition(&session, "DE_1")
            .await
    );
}

#[tokio::test]
async fn create_succeeds_on_201() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    Mock::given(path("/messaging/v1/email/definitions"))
        .and(method("POST"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({
            "definitionKey": "def1",
            "status": "Active",
            "name": "Welcome",
            "description": "Sent after sign-up",
            "classification": "Default Transactional",
            "content": { "customerKey": "432a987f-ab01-012a-0123-0a01a0a0ab01" },
            "subscriptions": {
                "list": "ALL_SUBSCRIBERS",
                "autoAddSubscriber": true,
                "updateSubscriber": true,
                "dataExtension": "DE_1"
            },
            "options": { "trackLinks": true }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    let outcome = app
        .email_client
        .create_email_definition(&session, &definition())
        .await;

    assert!(outcome.is_ok());
}

#[tokio::test]
async fn create_fails_with_the_raw_body_on_400() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    Mock::given(path("/messaging/v1/email/definitions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    let err = app
        .email_client
        .create_email_definition(&session, &definition())
        .await
        .unwrap_err();

    assert!(matches!(err, EmailClientError::DefinitionCreate { .. }));
    assert!(err.to_string().contains("bad request"));
}

#[tokio::test]
async fn create_fails_on_any_success_status_other_than_201() {
    let app = spawn_app().await;
    let session = app.authorized().await;

    Mock::given(any())
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("already there"))
        .expect(1)
        .mount(&app.marketing_cloud)
        .await;

    let err = app
        .email_client
        .create_email_definition(&session, &definition())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("already there"));
}
