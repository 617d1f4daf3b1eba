//! # Spotify Integration Module
//!
//! This module is the provider side of fennec: it validates credentials,
//! sends playback commands to the bound device and watches the player so the
//! session loop learns about readiness and state changes.
//!
//! ## Architecture
//!
//! ```text
//! Session loop (player::Session)
//!      ↑ PlayerEvent          ↓ PlayerApi commands
//! Player watcher          Spotify client
//!      ↓ polling              ↓ bearer requests
//!            Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Client
//!
//! [`SpotifyClient`] wraps the Web API endpoints fennec needs:
//! - `GET /me` - lightweight check used only to validate a credential
//! - `PUT /me/player/play` - start a track, or resume when sent without body
//! - `PUT /me/player/pause` - pause the bound device
//! - `PUT /me/player/volume` - set the device volume
//! - `GET /me/player/devices` - devices that can receive commands
//! - `GET /me/player` - current playback state (`204` when there is none)
//!
//! ### Watcher
//!
//! [`PlayerWatcher`] polls the device list and playback state and turns the
//! differences into [`PlayerEvent`](crate::types::PlayerEvent)s: `Ready` and
//! `NotReady` when the bound device appears or goes away, `StateChanged` when
//! the player moves to a different phase, `AuthenticationError` when Spotify
//! stops accepting the token. Other failed polls become `AccountError`
//! (premium required), `InitializationError` (the device list was never
//! read) or `PlaybackError`, once per failure streak.
//!
//! ### Auth
//!
//! [`auth`] follows the login redirect: it opens the provider consent page in
//! the browser and waits for the callback server to receive the fresh
//! credential.
//!
//! ## Error Handling
//!
//! - Any failure of the `/me` check, network errors included, is
//!   [`DjError::AuthInvalid`]. Nothing is retried locally.
//! - `401` on a player command is [`DjError::AuthInvalid`] as well.
//! - Other rejected player commands are [`DjError::Playback`].
//!
//! The [`PlayerApi`] trait is what the track controller and the auth session
//! hold, so both run against test doubles without a network.

pub mod auth;
mod client;
mod watcher;

use async_trait::async_trait;

pub use client::SpotifyClient;
pub use watcher::{PlayerWatcher, WatchState, failure_event, select_device};

use crate::{errors::DjError, types::Credential};

#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// Succeeds only if the provider accepts the credential.
    async fn verify(&self, credential: &Credential) -> Result<(), DjError>;

    async fn play(&self, credential: &Credential, device_id: &str, uri: &str)
    -> Result<(), DjError>;

    async fn pause(&self, credential: &Credential, device_id: &str) -> Result<(), DjError>;

    async fn resume(&self, credential: &Credential, device_id: &str) -> Result<(), DjError>;

    async fn set_volume(
        &self,
        credential: &Credential,
        device_id: &str,
        percent: u8,
    ) -> Result<(), DjError>;
}
