use std::{io::ErrorKind, path::PathBuf};

use crate::{
    config,
    errors::DjError,
    types::{Credential, StoredCredential},
};

pub struct CredentialManager {
    path: PathBuf,
    credential: Option<Credential>,
}

impl CredentialManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credential: None,
        }
    }

    pub async fn load() -> Result<Self, DjError> {
        Self::load_from(Self::credential_path()).await
    }

    /// Reads the credential file at `path`.
    ///
    /// A missing, malformed or half-filled file yields an empty store.
    pub async fn load_from(path: PathBuf) -> Result<Self, DjError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => return Err(DjError::IoError(e)),
        };

        let credential = serde_json::from_str::<StoredCredential>(&content)
            .ok()
            .and_then(StoredCredential::into_credential);

        Ok(Self { path, credential })
    }

    pub fn get(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub async fn set(&mut self, credential: Credential) -> Result<(), DjError> {
        self.credential = Some(credential);
        self.persist().await
    }

    pub async fn clear(&mut self) -> Result<(), DjError> {
        self.credential = None;
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DjError::IoError(e)),
        }
    }

    async fn persist(&self) -> Result<(), DjError> {
        let Some(credential) = &self.credential else {
            return Ok(());
        };

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&StoredCredential::from(credential))?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    fn credential_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/session.json");
        path
    }
}
