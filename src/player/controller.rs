use std::sync::Arc;

use tokio::task::JoinSet;

use crate::{
    backend::DjBackend,
    errors::DjError,
    management::RejectedStore,
    player::{DeviceBinder, EventReconciler, Reaction},
    spotify::PlayerApi,
    types::{Credential, FeedbackKind, PlayerEvent, Track},
    warning,
};

/// Extra recommendation fetches when a response holds nothing playable.
pub const MAX_RETRIES: u32 = 3;

/// What a handled event or command amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Connected(String),
    DeviceOffline,
    Playing(Track),
    Liked(Track),
    /// `next` is what started in its place, if anything could be started.
    Disliked { track: Track, next: Option<Track> },
    Paused,
    Resumed,
    Volume(u8),
}

/// Picks, starts and tracks the song that is playing.
///
/// Owns the playback pointer, the device binding and the event reconciler,
/// so the skip guard can only be armed together with the command whose echo
/// it is meant to swallow.
pub struct TrackQueue {
    credential: Credential,
    backend: Arc<dyn DjBackend>,
    player: Arc<dyn PlayerApi>,
    rejected: Box<dyn RejectedStore>,
    device: DeviceBinder,
    reconciler: EventReconciler,
    current: Option<Track>,
    reports: JoinSet<()>,
}

impl TrackQueue {
    pub fn new(
        credential: Credential,
        backend: Arc<dyn DjBackend>,
        player: Arc<dyn PlayerApi>,
        rejected: Box<dyn RejectedStore>,
    ) -> Self {
        Self {
            credential,
            backend,
            player,
            rejected,
            device: DeviceBinder::new(),
            reconciler: EventReconciler::new(),
            current: None,
            reports: JoinSet::new(),
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn device(&self) -> &DeviceBinder {
        &self.device
    }

    pub fn reconciler(&self) -> &EventReconciler {
        &self.reconciler
    }

    pub fn rejected(&self) -> &dyn RejectedStore {
        self.rejected.as_ref()
    }

    /// Fetches recommendations and starts the first playable, non-rejected one.
    ///
    /// A response without any playable uri is fetched again, up to
    /// [`MAX_RETRIES`] times. An empty response is not retried.
    pub async fn advance(&mut self) -> Result<Track, DjError> {
        for attempt in 0..=MAX_RETRIES {
            let device_id = self.device.require()?.to_string();

            let candidates = self.backend.recommendations(&self.credential).await?;
            let candidates: Vec<Track> = candidates
                .into_iter()
                .filter(|t| !self.rejected.contains(&t.id))
                .collect();

            if candidates.is_empty() {
                return Err(DjError::NoNewTracks);
            }

            match first_playable(candidates) {
                Some((track, uri)) => return self.start(track, &uri, &device_id).await,
                None if attempt < MAX_RETRIES => continue,
                None => break,
            }
        }

        Err(DjError::NoPlayableTrack)
    }

    /// Manual skip. The guard is armed by the play dispatch inside `advance`.
    pub async fn next(&mut self) -> Result<Track, DjError> {
        self.advance().await
    }

    /// Reports a like or dislike for the playing track.
    ///
    /// Without a playing track this does nothing. A dislike also rejects the
    /// track for good and moves on to the next one; only an invalid
    /// credential turns a failed move into an error, since the dislike itself
    /// has already been recorded.
    pub async fn record_feedback(&mut self, kind: FeedbackKind) -> Result<Outcome, DjError> {
        let Some(track) = self.current.clone() else {
            return Ok(Outcome::Idle);
        };

        self.report_feedback(&track.id, kind);

        if kind == FeedbackKind::Like {
            return Ok(Outcome::Liked(track));
        }

        self.rejected.insert(&track.id);
        if let Err(e) = self.rejected.persist().await {
            warning!("Cannot save disliked tracks: {}", e);
        }

        let next = match self.advance().await {
            Ok(next) => Some(next),
            Err(e) if e.is_auth_invalid() => return Err(e),
            Err(e) => {
                warning!("{}", e);
                None
            }
        };
        Ok(Outcome::Disliked { track, next })
    }

    /// Plays the first playable answer to a free-text request right away.
    ///
    /// The answer is taken as-is, rejected tracks included.
    pub async fn ask(&mut self, message: &str) -> Result<Outcome, DjError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(Outcome::Idle);
        }

        let device_id = self.device.require()?.to_string();
        let candidates = self.backend.command(&self.credential, message).await?;
        let Some((track, uri)) = first_playable(candidates) else {
            return Err(DjError::NoMatch);
        };

        self.start(track, &uri, &device_id).await.map(Outcome::Playing)
    }

    pub async fn pause(&mut self) -> Result<Outcome, DjError> {
        let device_id = self.device.require()?;
        self.player.pause(&self.credential, device_id).await?;
        Ok(Outcome::Paused)
    }

    pub async fn resume(&mut self) -> Result<Outcome, DjError> {
        let device_id = self.device.require()?;
        self.player.resume(&self.credential, device_id).await?;
        Ok(Outcome::Resumed)
    }

    pub async fn set_volume(&mut self, percent: u8) -> Result<Outcome, DjError> {
        let percent = percent.min(100);
        let device_id = self.device.require()?;
        self.player
            .set_volume(&self.credential, device_id, percent)
            .await?;
        Ok(Outcome::Volume(percent))
    }

    /// Routes a player notification through the reconciler and acts on it.
    pub async fn on_event(&mut self, event: &PlayerEvent) -> Result<Outcome, DjError> {
        match self.reconciler.reconcile(event) {
            Reaction::Bind(device_id) => {
                self.device.on_ready(device_id.clone());
                Ok(Outcome::Connected(device_id))
            }
            Reaction::Unbind => {
                self.device.on_not_ready();
                Ok(Outcome::DeviceOffline)
            }
            Reaction::Advance => self.advance().await.map(Outcome::Playing),
            Reaction::Reauthenticate(reason) => Err(DjError::AuthInvalid(reason)),
            Reaction::Swallowed | Reaction::Ignore => Ok(Outcome::Idle),
            Reaction::Log(message) => {
                warning!("{}", message);
                Ok(Outcome::Idle)
            }
        }
    }

    /// Waits for feedback reports still in flight.
    pub async fn flush_reports(&mut self) {
        while self.reports.join_next().await.is_some() {}
    }

    async fn start(&mut self, track: Track, uri: &str, device_id: &str) -> Result<Track, DjError> {
        self.current = Some(track.clone());
        self.arm_then_play(device_id, uri).await?;
        Ok(track)
    }

    /// Arms the skip guard and dispatches the play command as one step.
    ///
    /// A dispatch that fails produces no echo, so the guard is released.
    async fn arm_then_play(&mut self, device_id: &str, uri: &str) -> Result<(), DjError> {
        self.reconciler.arm_guard();
        let dispatched = self.player.play(&self.credential, device_id, uri).await;
        if dispatched.is_err() {
            self.reconciler.disarm_guard();
        }
        dispatched
    }

    fn report_feedback(&mut self, track_id: &str, kind: FeedbackKind) {
        while self.reports.try_join_next().is_some() {}

        let backend = Arc::clone(&self.backend);
        let user_id = self.credential.user_id().to_string();
        let track_id = track_id.to_string();
        self.reports.spawn(async move {
            if let Err(e) = backend.feedback(&user_id, &track_id, kind).await {
                warning!("Feedback for {} was not delivered: {}", track_id, e);
            }
        });
    }
}

fn first_playable(candidates: Vec<Track>) -> Option<(Track, String)> {
    candidates.into_iter().find_map(|track| {
        let uri = track.playable_uri()?.to_string();
        Some((track, uri))
    })
}
