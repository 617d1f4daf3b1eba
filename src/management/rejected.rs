use std::{collections::BTreeSet, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::{config, errors::DjError, warning};

/// Durable record of disliked track ids.
///
/// The controller only needs membership, insertion and a way to flush, so a
/// capped or expiring variant can stand in for [`RejectedManager`].
#[async_trait]
pub trait RejectedStore: Send + Sync {
    fn contains(&self, track_id: &str) -> bool;

    /// Returns `true` if the id was not rejected before.
    fn insert(&mut self, track_id: &str) -> bool;

    fn ids(&self) -> Vec<String>;

    async fn persist(&self) -> Result<(), DjError>;
}

/// JSON-file backed rejected set. Append-only, no expiry.
pub struct RejectedManager {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl RejectedManager {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ids: BTreeSet::new(),
        }
    }

    pub async fn load() -> Result<Self, DjError> {
        Self::load_from(Self::rejected_path()).await
    }

    /// Reads the rejected ids at `path`.
    ///
    /// A missing or malformed file yields an empty set, the same way the
    /// credential store treats its file.
    pub async fn load_from(path: PathBuf) -> Result<Self, DjError> {
        let json = match async_fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => return Err(DjError::IoError(e)),
        };

        let ids: Vec<String> = match serde_json::from_str(&json) {
            Ok(ids) => ids,
            Err(e) => {
                warning!("Ignoring unreadable disliked tracks file: {}", e);
                return Ok(Self::new(path));
            }
        };
        Ok(Self {
            path,
            ids: ids.into_iter().collect(),
        })
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    fn rejected_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("state/disliked.json");
        path
    }
}

#[async_trait]
impl RejectedStore for RejectedManager {
    fn contains(&self, track_id: &str) -> bool {
        self.ids.contains(track_id)
    }

    fn insert(&mut self, track_id: &str) -> bool {
        self.ids.insert(track_id.to_string())
    }

    fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    async fn persist(&self) -> Result<(), DjError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.ids)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}
