use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::JoinHandle, time::MissedTickBehavior};

use crate::{
    errors::DjError,
    spotify::SpotifyClient,
    types::{Credential, CurrentPlayback, Device, PlaybackState, PlayerEvent},
    warning,
};

/// Chooses the device to bind.
///
/// With a preferred id only that device qualifies. Otherwise the active
/// device wins, then the first one listed. Restricted devices never qualify.
pub fn select_device(devices: &[Device], preferred: Option<&str>) -> Option<String> {
    let mut usable = devices
        .iter()
        .filter(|d| !d.is_restricted && d.id.is_some());

    let chosen = match preferred {
        Some(preferred) => usable.find(|d| d.id.as_deref() == Some(preferred)),
        None => {
            let usable: Vec<&Device> = usable.collect();
            usable
                .iter()
                .find(|d| d.is_active)
                .or_else(|| usable.first())
                .copied()
        }
    };

    chosen.and_then(|d| d.id.clone())
}

/// What the watcher has seen so far; turns observations into notifications.
#[derive(Debug, Default)]
pub struct WatchState {
    bound: Option<String>,
    // outer None: nothing observed since the device was bound
    observed: Option<Option<PlaybackState>>,
}

impl WatchState {
    pub fn bound(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    pub fn observe_devices(&mut self, selected: Option<String>) -> Option<PlayerEvent> {
        if selected == self.bound {
            return None;
        }

        let previous = std::mem::replace(&mut self.bound, selected.clone());
        self.observed = None;
        match selected {
            Some(device_id) => Some(PlayerEvent::Ready { device_id }),
            None => Some(PlayerEvent::NotReady {
                device_id: previous,
            }),
        }
    }

    /// The first observation after binding only seeds the baseline, so a
    /// stale "ended" state left on the device does not trigger an advance.
    pub fn observe_playback(&mut self, state: Option<PlaybackState>) -> Option<PlayerEvent> {
        let previous = self.observed.replace(state)?;

        let changed = match (previous, state) {
            (Some(before), Some(now)) => {
                before.paused != now.paused
                    || before.duration != now.duration
                    || now.position < before.position
            }
            (None, None) => false,
            _ => true,
        };

        changed.then_some(PlayerEvent::StateChanged(state))
    }
}

/// Polls Spotify and feeds [`PlayerEvent`]s into the session loop.
pub struct PlayerWatcher {
    client: Arc<SpotifyClient>,
    credential: Credential,
    preferred: Option<String>,
    interval: Duration,
}

impl PlayerWatcher {
    pub fn new(
        client: Arc<SpotifyClient>,
        credential: Credential,
        preferred: Option<String>,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            credential,
            preferred,
            interval,
        }
    }

    pub fn spawn(self, events: mpsc::Sender<PlayerEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(events))
    }

    async fn run(self, events: mpsc::Sender<PlayerEvent>) {
        let mut state = WatchState::default();
        let mut failing = false;
        let mut initialized = false;
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let devices = match self.client.devices(&self.credential).await {
                Ok(devices) => devices,
                Err(e) => {
                    if Self::report(e, initialized, &events, &mut failing).await {
                        return;
                    }
                    continue;
                }
            };
            initialized = true;

            let selected = select_device(&devices, self.preferred.as_deref());
            if let Some(event) = state.observe_devices(selected) {
                if events.send(event).await.is_err() {
                    return;
                }
            }

            let Some(bound) = state.bound().map(str::to_string) else {
                failing = false;
                continue;
            };

            let playback = match self.client.playback_state(&self.credential).await {
                Ok(playback) => playback,
                Err(e) => {
                    if Self::report(e, initialized, &events, &mut failing).await {
                        return;
                    }
                    continue;
                }
            };
            failing = false;

            if let Some(event) = state.observe_playback(playback_on(playback, &bound)) {
                if events.send(event).await.is_err() {
                    return;
                }
            }
        }
    }

    /// Returns `true` when the watcher has to stop.
    ///
    /// Only the first failure of a streak is reported, so a player stuck on
    /// the same error forces one advance rather than one per poll.
    async fn report(
        error: DjError,
        initialized: bool,
        events: &mpsc::Sender<PlayerEvent>,
        failing: &mut bool,
    ) -> bool {
        let event = failure_event(&error, initialized);
        if error.is_auth_invalid() {
            if let Some(event) = event {
                let _ = events.send(event).await;
            }
            return true;
        }

        if *failing {
            return events.is_closed();
        }
        *failing = true;

        warning!("Player watcher: {}", error);
        if let Some(event) = event {
            if events.send(event).await.is_err() {
                return true;
            }
        }
        events.is_closed()
    }
}

/// The notification a failed poll amounts to.
///
/// `initialized` is false until the device list has been read once; a
/// failure before that means the player never came up.
pub fn failure_event(error: &DjError, initialized: bool) -> Option<PlayerEvent> {
    match error {
        DjError::AuthInvalid(_) => Some(PlayerEvent::AuthenticationError(error.to_string())),
        DjError::Playback(reason) if is_account_problem(reason) => {
            Some(PlayerEvent::AccountError(reason.clone()))
        }
        _ if !initialized => Some(PlayerEvent::InitializationError(error.to_string())),
        DjError::Playback(reason) => Some(PlayerEvent::PlaybackError(reason.clone())),
        _ => None,
    }
}

fn is_account_problem(reason: &str) -> bool {
    reason.to_ascii_uppercase().contains("PREMIUM_REQUIRED")
}

/// Playback state that belongs to the bound device, if any.
fn playback_on(playback: Option<CurrentPlayback>, device_id: &str) -> Option<PlaybackState> {
    playback
        .filter(|p| p.device_id().is_none_or(|id| id == device_id))
        .map(PlaybackState::from)
}
