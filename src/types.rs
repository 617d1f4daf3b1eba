use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Where a credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialSource {
    /// Query parameters of the login redirect.
    UrlParam,
    /// The credential file from a previous run.
    Stored,
}

/// Access token plus the user id it belongs to.
///
/// Either both parts are present or there is no credential at all; the only
/// way to build one is [`Credential::new`], which refuses empty fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    access_token: String,
    user_id: String,
    issued_via: CredentialSource,
    obtained_at: i64,
}

impl Credential {
    pub fn new(
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        issued_via: CredentialSource,
    ) -> Option<Self> {
        let access_token = access_token.into();
        let user_id = user_id.into();
        if access_token.trim().is_empty() || user_id.trim().is_empty() {
            return None;
        }

        Some(Self {
            access_token,
            user_id,
            issued_via,
            obtained_at: chrono::Utc::now().timestamp(),
        })
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn issued_via(&self) -> CredentialSource {
        self.issued_via
    }

    pub fn obtained_at(&self) -> i64 {
        self.obtained_at
    }
}

/// On-disk shape of the credential: two scalar entries under fixed keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    #[serde(rename = "spotify_token", default)]
    pub access_token: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub obtained_at: Option<i64>,
}

impl StoredCredential {
    pub fn into_credential(self) -> Option<Credential> {
        let mut credential =
            Credential::new(self.access_token, self.user_id, CredentialSource::Stored)?;
        if let Some(obtained_at) = self.obtained_at {
            credential.obtained_at = obtained_at;
        }
        Some(credential)
    }
}

impl From<&Credential> for StoredCredential {
    fn from(credential: &Credential) -> Self {
        Self {
            access_token: credential.access_token.clone(),
            user_id: credential.user_id.clone(),
            obtained_at: Some(credential.obtained_at),
        }
    }
}

/// Query parameters the backend appends when it redirects back after login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedirectParams {
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

impl RedirectParams {
    pub fn credential(&self) -> Option<Credential> {
        Credential::new(
            self.access_token.clone()?,
            self.user_id.clone()?,
            CredentialSource::UrlParam,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub images: Vec<TrackImage>,
}

/// A recommendation candidate. Without a `uri` it cannot be played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Option<TrackAlbum>,
}

impl Track {
    pub fn playable_uri(&self) -> Option<&str> {
        self.uri.as_deref().filter(|uri| !uri.is_empty())
    }

    pub fn artist(&self) -> &str {
        self.artists
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown")
    }

    /// Album name, hiding the backend's "Unknown" placeholder.
    pub fn album_name(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .filter(|name| !name.is_empty() && *name != "Unknown")
    }

    pub fn image_url(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|a| a.images.first())
            .and_then(|img| img.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Like => write!(f, "like"),
            FeedbackKind::Dislike => write!(f, "dislike"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub user_id: String,
    pub track_id: String,
    pub feedback: FeedbackKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub user_id: String,
    pub message: String,
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_restricted: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlayingItem {
    #[serde(default)]
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlayback {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<CurrentlyPlayingItem>,
    #[serde(default)]
    pub device: Option<Device>,
}

impl CurrentPlayback {
    pub fn device_id(&self) -> Option<&str> {
        self.device.as_ref().and_then(|d| d.id.as_deref())
    }
}

/// Player state as carried by a state-change notification. Times in ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub paused: bool,
    pub position: u64,
    pub duration: u64,
}

impl PlaybackState {
    /// Paused at position zero with a known duration: the track ran out.
    pub fn is_natural_end(&self) -> bool {
        self.paused && self.position == 0 && self.duration > 0
    }
}

impl From<CurrentPlayback> for PlaybackState {
    fn from(playback: CurrentPlayback) -> Self {
        Self {
            paused: !playback.is_playing,
            position: playback.progress_ms.unwrap_or(0),
            duration: playback.item.map(|i| i.duration_ms).unwrap_or(0),
        }
    }
}

/// Notifications the player emits into the session loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready { device_id: String },
    NotReady { device_id: Option<String> },
    /// `None` when the player has no state to report.
    StateChanged(Option<PlaybackState>),
    AuthenticationError(String),
    PlaybackError(String),
    InitializationError(String),
    AccountError(String),
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub playable: String,
    pub cover: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        Self {
            name: track.name.clone(),
            artist: track.artist().to_string(),
            album: track.album_name().unwrap_or("-").to_string(),
            playable: if track.playable_uri().is_some() {
                "yes".to_string()
            } else {
                "no".to_string()
            },
            cover: track.image_url().unwrap_or("-").to_string(),
        }
    }
}
