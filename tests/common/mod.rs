#![allow(dead_code)]

use std::{
    collections::{BTreeSet, VecDeque},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use fennec::{
    backend::DjBackend,
    errors::DjError,
    management::RejectedStore,
    spotify::PlayerApi,
    types::{Credential, CredentialSource, FeedbackKind, PlaybackState, Track, TrackArtist},
};

pub fn credential() -> Credential {
    Credential::new("token-abc", "user-1", CredentialSource::Stored).unwrap()
}

pub fn track(id: &str, uri: Option<&str>) -> Track {
    Track {
        id: id.to_string(),
        uri: uri.map(str::to_string),
        name: format!("Song {id}"),
        artists: vec![TrackArtist {
            name: "Some Artist".to_string(),
        }],
        album: None,
    }
}

pub fn natural_end() -> PlaybackState {
    PlaybackState {
        paused: true,
        position: 0,
        duration: 180_000,
    }
}

pub fn playing(position: u64) -> PlaybackState {
    PlaybackState {
        paused: false,
        position,
        duration: 180_000,
    }
}

/// Backend double: scripted recommendation answers, then a fixed list.
#[derive(Default)]
pub struct FakeBackend {
    scripted: Mutex<VecDeque<Result<Vec<Track>, DjError>>>,
    fallback: Mutex<Vec<Track>>,
    command_reply: Mutex<Vec<Track>>,
    pub recommendation_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub feedback: Mutex<Vec<(String, String, FeedbackKind)>>,
    pub commands: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let backend = Self::default();
        *backend.fallback.lock().unwrap() = tracks;
        backend
    }

    pub fn script(&self, answer: Result<Vec<Track>, DjError>) {
        self.scripted.lock().unwrap().push_back(answer);
    }

    pub fn reply_to_commands(&self, tracks: Vec<Track>) {
        *self.command_reply.lock().unwrap() = tracks;
    }

    pub fn fetches(&self) -> usize {
        self.recommendation_calls.load(Ordering::SeqCst)
    }

    pub fn logins(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn feedback(&self) -> Vec<(String, String, FeedbackKind)> {
        self.feedback.lock().unwrap().clone()
    }
}

#[async_trait]
impl DjBackend for FakeBackend {
    async fn recommendations(&self, _credential: &Credential) -> Result<Vec<Track>, DjError> {
        self.recommendation_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(answer) = self.scripted.lock().unwrap().pop_front() {
            return answer;
        }
        Ok(self.fallback.lock().unwrap().clone())
    }

    async fn feedback(
        &self,
        user_id: &str,
        track_id: &str,
        kind: FeedbackKind,
    ) -> Result<(), DjError> {
        self.feedback
            .lock()
            .unwrap()
            .push((user_id.to_string(), track_id.to_string(), kind));
        Ok(())
    }

    async fn command(&self, _credential: &Credential, message: &str) -> Result<Vec<Track>, DjError> {
        self.commands.lock().unwrap().push(message.to_string());
        Ok(self.command_reply.lock().unwrap().clone())
    }

    async fn login_url(&self) -> Result<String, DjError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        Ok("https://accounts.example/authorize".to_string())
    }
}

/// Player double recording every command as `verb:device[:arg]`.
#[derive(Default)]
pub struct FakePlayer {
    pub calls: Mutex<Vec<String>>,
    pub reject_token: bool,
    pub fail_play: bool,
}

impl FakePlayer {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn plays(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("play:"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlayerApi for FakePlayer {
    async fn verify(&self, _credential: &Credential) -> Result<(), DjError> {
        if self.reject_token {
            return Err(DjError::AuthInvalid("profile check answered 401".to_string()));
        }
        Ok(())
    }

    async fn play(&self, _credential: &Credential, device_id: &str, uri: &str) -> Result<(), DjError> {
        self.record(format!("play:{device_id}:{uri}"));
        if self.fail_play {
            return Err(DjError::Playback("403: restricted".to_string()));
        }
        Ok(())
    }

    async fn pause(&self, _credential: &Credential, device_id: &str) -> Result<(), DjError> {
        self.record(format!("pause:{device_id}"));
        Ok(())
    }

    async fn resume(&self, _credential: &Credential, device_id: &str) -> Result<(), DjError> {
        self.record(format!("resume:{device_id}"));
        Ok(())
    }

    async fn set_volume(
        &self,
        _credential: &Credential,
        device_id: &str,
        percent: u8,
    ) -> Result<(), DjError> {
        self.record(format!("volume:{device_id}:{percent}"));
        Ok(())
    }
}

/// In-memory rejected set.
#[derive(Default)]
pub struct MemoryRejected {
    ids: BTreeSet<String>,
}

impl MemoryRejected {
    pub fn with(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

#[async_trait]
impl RejectedStore for MemoryRejected {
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
        Ok(())
    }
}
