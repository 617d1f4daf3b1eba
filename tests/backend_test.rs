use fennec::{
    backend::{BackendClient, DjBackend},
    errors::DjError,
    types::{Credential, CredentialSource, FeedbackKind},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

fn credential() -> Credential {
    Credential::new("tok", "user 1", CredentialSource::Stored).unwrap()
}

#[tokio::test]
async fn test_recommendations_sends_credential_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/recommendations"))
        .and(query_param("access_token", "tok"))
        .and(query_param("user_id", "user 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": [
                {
                    "id": "t1",
                    "uri": "spotify:track:u1",
                    "name": "First",
                    "artists": [{ "name": "A" }],
                    "album": { "name": "Unknown", "images": [{ "url": "https://img/1" }] }
                },
                { "id": "t2", "name": "No uri" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(format!("{}/", server.uri()));
    let tracks = client.recommendations(&credential()).await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].playable_uri(), Some("spotify:track:u1"));
    assert_eq!(tracks[0].artist(), "A");
    assert_eq!(tracks[0].album_name(), None);
    assert_eq!(tracks[0].image_url(), Some("https://img/1"));
    assert_eq!(tracks[1].playable_uri(), None);
    assert_eq!(tracks[1].artist(), "Unknown");
}

#[tokio::test]
async fn test_recommendations_missing_list_is_empty() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    assert!(client.recommendations(&credential()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recommendations_unauthorized_is_auth_invalid() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let result = client.recommendations(&credential()).await;
    assert!(result.is_err_and(|e| e.is_auth_invalid()));
}

#[tokio::test]
async fn test_recommendations_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(path("/recommendations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model offline"))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    match client.recommendations(&credential()).await {
        Err(DjError::Recommendation { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "model offline");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_feedback_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/feedback"))
        .and(body_json(json!({
            "user_id": "user 1",
            "track_id": "t1",
            "feedback": "dislike"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    client
        .feedback("user 1", "t1", FeedbackKind::Dislike)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_feedback_ignores_the_answer() {
    let server = MockServer::start().await;
    Mock::given(path("/feedback"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    assert!(client.feedback("u", "t", FeedbackKind::Like).await.is_ok());
}

#[tokio::test]
async fn test_command_posts_message_with_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/command"))
        .and(body_json(json!({
            "user_id": "user 1",
            "message": "something calm",
            "access_token": "tok"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recommendations": [{ "id": "t7", "uri": "spotify:track:u7" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let tracks = client
        .command(&credential(), "something calm")
        .await
        .unwrap();
    assert_eq!(tracks[0].id, "t7");
}

#[tokio::test]
async fn test_login_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "url": "https://accounts/authorize" })),
        )
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    assert_eq!(client.login_url().await.unwrap(), "https://accounts/authorize");
}

#[tokio::test]
async fn test_login_url_garbage_is_login_failed() {
    let server = MockServer::start().await;
    Mock::given(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    assert!(matches!(
        client.login_url().await,
        Err(DjError::LoginFailed(_))
    ));
}
