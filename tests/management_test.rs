use fennec::{
    management::{CredentialManager, RejectedManager, RejectedStore},
    types::{Credential, CredentialSource},
};

fn credential() -> Credential {
    Credential::new("tok", "user-1", CredentialSource::UrlParam).unwrap()
}

#[tokio::test]
async fn test_credential_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache/session.json");

    let mut store = CredentialManager::new(path.clone());
    store.set(credential()).await.unwrap();

    let reloaded = CredentialManager::load_from(path.clone()).await.unwrap();
    let stored = reloaded.get().unwrap();
    assert_eq!(stored.access_token(), "tok");
    assert_eq!(stored.user_id(), "user-1");
    assert_eq!(stored.issued_via(), CredentialSource::Stored);
    assert!(stored.obtained_at() > 0);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["spotify_token"], "tok");
    assert_eq!(raw["user_id"], "user-1");
}

#[tokio::test]
async fn test_missing_credential_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialManager::load_from(dir.path().join("nothing.json"))
        .await
        .unwrap();
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_partial_credential_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{ "spotify_token": "tok" }"#).unwrap();

    let store = CredentialManager::load_from(path).await.unwrap();
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_malformed_credential_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "not json").unwrap();

    let store = CredentialManager::load_from(path).await.unwrap();
    assert!(store.get().is_none());
}

#[tokio::test]
async fn test_clear_removes_both_parts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache/session.json");
    let mut store = CredentialManager::new(path.clone());
    store.set(credential()).await.unwrap();

    store.clear().await.unwrap();
    assert!(store.get().is_none());
    assert!(!path.exists());

    // clearing an empty store is fine
    store.clear().await.unwrap();
    let reloaded = CredentialManager::load_from(path).await.unwrap();
    assert!(reloaded.get().is_none());
}

#[tokio::test]
async fn test_rejected_set_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let rejected = RejectedManager::load_from(dir.path().join("state/disliked.json"))
        .await
        .unwrap();
    assert_eq!(rejected.count(), 0);
    assert!(!rejected.contains("t1"));
}

#[tokio::test]
async fn test_rejected_set_has_set_semantics_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state/disliked.json");

    let mut rejected = RejectedManager::load_from(path.clone()).await.unwrap();
    assert!(rejected.insert("t2"));
    assert!(rejected.insert("t1"));
    assert!(!rejected.insert("t1"));
    rejected.persist().await.unwrap();

    let reloaded = RejectedManager::load_from(path).await.unwrap();
    assert_eq!(reloaded.count(), 2);
    assert_eq!(reloaded.ids(), vec!["t1".to_string(), "t2".to_string()]);
    assert!(reloaded.contains("t2"));
}

#[tokio::test]
async fn test_malformed_rejected_set_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disliked.json");
    std::fs::write(&path, "{ not a list").unwrap();

    let mut rejected = RejectedManager::load_from(path.clone()).await.unwrap();
    assert_eq!(rejected.count(), 0);

    // the next dislike replaces the broken file
    rejected.insert("t1");
    rejected.persist().await.unwrap();
    let reloaded = RejectedManager::load_from(path).await.unwrap();
    assert_eq!(reloaded.ids(), vec!["t1".to_string()]);
}
