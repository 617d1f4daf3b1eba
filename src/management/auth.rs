use std::sync::Arc;

use crate::{
    backend::DjBackend,
    errors::DjError,
    info,
    management::CredentialManager,
    spotify::PlayerApi,
    types::{Credential, CredentialSource},
    warning,
};

/// Result of bringing a session up.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Authenticated(Credential),
    /// The credential is gone; the user has to log in at `login_url`.
    Redirect { login_url: String },
}

/// Picks the credential to use: the login redirect wins over the stored one.
pub fn resolve_credential(
    from_redirect: Option<Credential>,
    stored: Option<&Credential>,
) -> Option<Credential> {
    from_redirect.or_else(|| stored.cloned())
}

pub struct AuthSession {
    store: CredentialManager,
    player: Arc<dyn PlayerApi>,
    backend: Arc<dyn DjBackend>,
}

impl AuthSession {
    pub fn new(
        store: CredentialManager,
        player: Arc<dyn PlayerApi>,
        backend: Arc<dyn DjBackend>,
    ) -> Self {
        Self {
            store,
            player,
            backend,
        }
    }

    pub async fn bootstrap(
        &mut self,
        from_redirect: Option<Credential>,
    ) -> Result<AuthState, DjError> {
        let Some(credential) = resolve_credential(from_redirect, self.store.get()) else {
            info!("No session found, starting login.");
            return self.redirect().await;
        };

        if credential.issued_via() == CredentialSource::UrlParam {
            if let Err(e) = self.store.set(credential.clone()).await {
                warning!("Cannot save session: {}", e);
            }
        }

        match self.validate(&credential).await {
            Ok(()) => Ok(AuthState::Authenticated(credential)),
            Err(e) => {
                warning!("{}", e);
                self.redirect().await
            }
        }
    }

    /// Probes the provider with the credential. Never retried.
    pub async fn validate(&self, credential: &Credential) -> Result<(), DjError> {
        self.player.verify(credential).await
    }

    /// Drops the credential and asks the backend where to log in again.
    ///
    /// Returns the login URL the user has to be sent to.
    pub async fn reauthenticate(&mut self) -> Result<String, DjError> {
        if let Err(e) = self.store.clear().await {
            warning!("Cannot remove stored session: {}", e);
        }

        self.backend.login_url().await
    }

    async fn redirect(&mut self) -> Result<AuthState, DjError> {
        let login_url = self.reauthenticate().await?;
        Ok(AuthState::Redirect { login_url })
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.store.get()
    }
}
