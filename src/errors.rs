use std::{fmt, io::Error};

/// Every failure the DJ session can run into.
///
/// Only [`DjError::AuthInvalid`] changes the course of a session: it always
/// ends in re-authentication. Everything else becomes a status line or a log
/// entry and the prompt stays usable.
#[derive(Debug)]
pub enum DjError {
    /// The provider or the backend rejected the credential, the profile check
    /// failed, or the player reported an authentication error.
    AuthInvalid(String),
    /// No playback device is bound.
    DeviceUnavailable,
    /// The candidate list was empty after removing rejected tracks.
    NoNewTracks,
    /// No candidate carried a playable uri, even after retrying.
    NoPlayableTrack,
    /// A chat command produced nothing playable.
    NoMatch,
    /// The backend answered the recommendation request with an error status.
    Recommendation { status: u16, body: String },
    /// The play command (or another transport command) was rejected.
    Playback(String),
    /// The login-initiation endpoint could not be reached or answered junk.
    LoginFailed(String),
    /// Network failure on a non-authenticating call.
    Transient(reqwest::Error),
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl DjError {
    pub fn is_auth_invalid(&self) -> bool {
        matches!(self, DjError::AuthInvalid(_))
    }
}

impl fmt::Display for DjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjError::AuthInvalid(reason) => write!(f, "🔑 Session expired ({reason})"),
            DjError::DeviceUnavailable => write!(f, "❌ Waiting for Spotify device…"),
            DjError::NoNewTracks => write!(f, "🎶 No new tracks."),
            DjError::NoPlayableTrack => write!(f, "⚠️ No playable track."),
            DjError::NoMatch => write!(f, "🤔 No match."),
            DjError::Recommendation { status, body } => {
                write!(f, "❌ Recommendation error. ({status}: {body})")
            }
            DjError::Playback(reason) => write!(f, "❌ Playback failed: {reason}"),
            DjError::LoginFailed(reason) => write!(f, "🚫 Login failed: {reason}"),
            DjError::Transient(e) => write!(f, "❌ Could not load songs. ({e})"),
            DjError::IoError(e) => write!(f, "Storage error: {e}"),
            DjError::SerdeError(e) => write!(f, "Malformed data: {e}"),
        }
    }
}

impl std::error::Error for DjError {}

impl From<Error> for DjError {
    fn from(err: Error) -> Self {
        DjError::IoError(err)
    }
}

impl From<serde_json::Error> for DjError {
    fn from(err: serde_json::Error) -> Self {
        DjError::SerdeError(err)
    }
}

impl From<reqwest::Error> for DjError {
    fn from(err: reqwest::Error) -> Self {
        DjError::Transient(err)
    }
}
