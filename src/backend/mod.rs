//! # DJ Backend Module
//!
//! Client for the local recommendation service ("DJ backend"). The backend
//! owns everything the terminal client treats as a black box: ranking
//! recommendations, storing like/dislike feedback, interpreting chat
//! commands and the provider's OAuth code exchange.
//!
//! ## Endpoints
//!
//! - `GET /recommendations?access_token=&user_id=` → `{ recommendations: Track[] }`
//! - `POST /feedback` `{ user_id, track_id, feedback }`, response ignored
//! - `POST /command` `{ user_id, message, access_token }` → `{ recommendations: Track[] }`
//! - `GET /login` → `{ url }`, the provider consent screen to send the user to
//!
//! ## Error Mapping
//!
//! - `401` on `/recommendations` or `/command` means the credential is no
//!   longer accepted and becomes [`DjError::AuthInvalid`]
//! - any other error status becomes [`DjError::Recommendation`]
//! - network failures become [`DjError::Transient`]
//! - every failure of `/login` becomes [`DjError::LoginFailed`]
//!
//! The [`DjBackend`] trait is the seam the track controller talks to, so the
//! controller can run against a recording double in tests.

mod client;

use async_trait::async_trait;

pub use client::BackendClient;

use crate::{
    errors::DjError,
    types::{Credential, FeedbackKind, Track},
};

#[async_trait]
pub trait DjBackend: Send + Sync {
    /// Candidate tracks for the credential's user, best first.
    async fn recommendations(&self, credential: &Credential) -> Result<Vec<Track>, DjError>;

    /// Reports a like or dislike. Callers treat failures as log-only.
    async fn feedback(
        &self,
        user_id: &str,
        track_id: &str,
        kind: FeedbackKind,
    ) -> Result<(), DjError>;

    /// Free-text request ("something upbeat"), answered with candidates.
    async fn command(&self, credential: &Credential, message: &str)
    -> Result<Vec<Track>, DjError>;

    /// URL of the provider login the user has to visit.
    async fn login_url(&self) -> Result<String, DjError>;
}
