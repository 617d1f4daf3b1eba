use std::sync::Arc;

use crate::{
    Res,
    backend::{BackendClient, DjBackend},
    config,
    management::CredentialManager,
    server, spotify,
    spotify::auth::RedirectSlot,
    success,
    types::Credential,
    warning,
};

/// Logs in through the DJ backend and stores the credential.
pub async fn auth(slot: RedirectSlot) {
    tokio::spawn(server::start_callback_server(Arc::clone(&slot)));

    if let Err(e) = login_and_store(slot).await {
        warning!("{}", e);
    }
}

async fn login_and_store(slot: RedirectSlot) -> Res<()> {
    let backend = BackendClient::new(config::backend_url());
    let login_url = backend.login_url().await?;

    let Some(credential) = login(slot, &login_url).await else {
        return Ok(());
    };

    let mut store = CredentialManager::load().await?;
    let user_id = credential.user_id().to_string();
    store.set(credential).await?;
    success!("Logged in as {}", user_id);
    Ok(())
}

/// Opens `login_url` and waits for the redirect to deliver a credential.
pub(crate) async fn login(slot: RedirectSlot, login_url: &str) -> Option<Credential> {
    let credential = spotify::auth::follow_login(slot, login_url, config::login_timeout()).await;
    if credential.is_none() {
        warning!("Timeout waiting for the login redirect. Run `fennec auth` to try again.");
    }
    credential
}
