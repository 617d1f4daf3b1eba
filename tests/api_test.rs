use std::sync::Arc;

use axum::{Extension, extract::Query};
use fennec::{
    api,
    spotify::auth::RedirectSlot,
    types::{CredentialSource, RedirectParams},
};
use tokio::sync::Mutex;

fn slot() -> RedirectSlot {
    Arc::new(Mutex::new(None))
}

#[tokio::test]
async fn test_callback_stores_complete_credential() {
    let slot = slot();
    let params = RedirectParams {
        access_token: Some("tok".to_string()),
        user_id: Some("user-1".to_string()),
    };

    api::callback(Query(params), Extension(Arc::clone(&slot))).await;

    let stored = slot.lock().await.clone().unwrap();
    assert_eq!(stored.access_token(), "tok");
    assert_eq!(stored.issued_via(), CredentialSource::UrlParam);
}

#[tokio::test]
async fn test_callback_refuses_partial_redirect() {
    let slot = slot();
    let params = RedirectParams {
        access_token: Some("tok".to_string()),
        user_id: None,
    };

    api::callback(Query(params), Extension(Arc::clone(&slot))).await;
    assert!(slot.lock().await.is_none());

    let params = RedirectParams {
        access_token: Some("".to_string()),
        user_id: Some("user-1".to_string()),
    };
    api::callback(Query(params), Extension(Arc::clone(&slot))).await;
    assert!(slot.lock().await.is_none());
}

#[tokio::test]
async fn test_health_reports_pending_redirect() {
    let slot = slot();
    let body = api::health(Extension(Arc::clone(&slot))).await;
    assert_eq!(body.0["service"], "fennec");
    assert_eq!(body.0["redirect_received"], false);
}
