use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo() -> Repository {
    Repository {
        id: Some(1),
        name: "Repo-A".to_string(),
        archived: false,
        admin: true,
    }
}

fn client(server: &MockServer) -> DependabotClient {
    DependabotClient::with_base_url("abcdef", "7890", &server.uri()).unwrap()
}

#[test]
fn test_outcome_created() {
    assert_eq!(
        RegistrationOutcome::from_response(201, "{}"),
        RegistrationOutcome::Created
    );
}

#[test]
fn test_outcome_already_exists() {
    assert_eq!(
        RegistrationOutcome::from_response(400, r#"{"errors": "config already exists"}"#),
        RegistrationOutcome::AlreadyExists
    );
}

#[test]
fn test_outcome_other_bad_request_is_rejected() {
    assert_eq!(
        RegistrationOutcome::from_response(400, "invalid package manager"),
        RegistrationOutcome::Rejected {
            status: 400,
            body: "invalid package manager".to_string(),
        }
    );
}

#[test]
fn test_outcome_already_exists_needs_bad_request() {
    assert!(matches!(
        RegistrationOutcome::from_response(500, "already exists"),
        RegistrationOutcome::Rejected { status: 500, .. }
    ));
}

#[test]
fn test_request_body_shape() {
    let body = serde_json::to_value(UpdateConfigRequest::daily(&repo(), "docker", "7890")).unwrap();

    assert_eq!(
        body,
        json!({
            "repo-id": 1,
            "package-manager": "docker",
            "update-schedule": "daily",
            "directory": "/",
            "account-id": "7890",
            "account-type": "org"
        })
    );
}

#[tokio::test]
async fn test_register_posts_update_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_configs"))
        .and(header("authorization", "Personal abcdef"))
        .and(header("cache-control", "no-cache"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "repo-id": 1,
            "package-manager": "docker",
            "update-schedule": "daily",
            "directory": "/",
            "account-id": "7890",
            "account-type": "org"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let mut report = Report::new();

    client(&server)
        .register(&repo(), "docker", &mut report)
        .await
        .unwrap();

    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_register_already_exists_is_not_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_configs"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("Update config already exists for this repo"),
        )
        .mount(&server)
        .await;
    let mut report = Report::new();

    client(&server)
        .register(&repo(), "pip", &mut report)
        .await
        .unwrap();

    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_register_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_configs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let mut report = Report::new();

    client(&server)
        .register(&repo(), "docker", &mut report)
        .await
        .unwrap();

    let expected = Failure::Registration {
        repo: "Repo-A".to_string(),
        package_manager: "docker".to_string(),
        status: 500,
        body: "boom".to_string(),
    };
    assert_eq!(report.failures(), &[expected.clone()]);
    let message = expected.to_string();
    assert!(message.contains("Repo-A"));
    assert!(message.contains("docker"));
    assert!(message.contains("500"));
    assert!(message.contains("boom"));
}
