use tokio::sync::mpsc;

use crate::{
    errors::DjError,
    info,
    management::AuthSession,
    player::{Outcome, TrackQueue},
    success,
    types::{FeedbackKind, PlayerEvent, Track},
    warning,
};

/// Something the user typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Start,
    Next,
    Like,
    Dislike,
    Pause,
    Resume,
    Volume(u8),
    Ask(String),
    Quit,
}

/// Why a session loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionExit {
    Quit,
    /// The credential was rejected and dropped. `login_url` is where the
    /// user logs in again, `None` if the backend could not provide one.
    Reauthenticate { login_url: Option<String> },
}

/// The single logical queue every notification and command goes through.
///
/// One input is handled to completion before the next one is taken, so a
/// "next" typed while an advance is still waiting on the network queues up
/// behind it instead of racing it.
pub struct Session {
    auth: AuthSession,
    queue: TrackQueue,
    autostart: bool,
}

impl Session {
    pub fn new(auth: AuthSession, queue: TrackQueue) -> Self {
        Self {
            auth,
            queue,
            autostart: false,
        }
    }

    /// Starts playing as soon as the first device connects.
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn queue(&self) -> &TrackQueue {
        &self.queue
    }

    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<PlayerEvent>,
        commands: &mut mpsc::Receiver<UserCommand>,
    ) -> SessionExit {
        loop {
            let exit = tokio::select! {
                Some(event) = events.recv() => self.handle_event(event).await,
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command).await,
                    None => Some(SessionExit::Quit),
                },
            };

            if let Some(exit) = exit {
                self.queue.flush_reports().await;
                return exit;
            }
        }
    }

    pub async fn handle_event(&mut self, event: PlayerEvent) -> Option<SessionExit> {
        let result = self.queue.on_event(&event).await;
        let connected = matches!(result, Ok(Outcome::Connected(_)));
        if let Some(exit) = self.settle(result).await {
            return Some(exit);
        }

        if connected && self.autostart && self.queue.current().is_none() {
            self.autostart = false;
            let result = self.queue.advance().await.map(Outcome::Playing);
            return self.settle(result).await;
        }
        None
    }

    pub async fn handle_command(&mut self, command: UserCommand) -> Option<SessionExit> {
        let result = match command {
            UserCommand::Start => self.queue.advance().await.map(Outcome::Playing),
            UserCommand::Next => self.queue.next().await.map(Outcome::Playing),
            UserCommand::Like => self.queue.record_feedback(FeedbackKind::Like).await,
            UserCommand::Dislike => self.queue.record_feedback(FeedbackKind::Dislike).await,
            UserCommand::Pause => self.queue.pause().await,
            UserCommand::Resume => self.queue.resume().await,
            UserCommand::Volume(percent) => self.queue.set_volume(percent).await,
            UserCommand::Ask(message) => self.queue.ask(&message).await,
            UserCommand::Quit => return Some(SessionExit::Quit),
        };
        self.settle(result).await
    }

    async fn settle(&mut self, result: Result<Outcome, DjError>) -> Option<SessionExit> {
        match result {
            Ok(outcome) => {
                announce(&outcome);
                None
            }
            Err(e) if e.is_auth_invalid() => {
                warning!("{}", e);
                Some(self.reauthenticate().await)
            }
            Err(e) => {
                warning!("{}", e);
                None
            }
        }
    }

    async fn reauthenticate(&mut self) -> SessionExit {
        self.queue.flush_reports().await;
        match self.auth.reauthenticate().await {
            Ok(login_url) => SessionExit::Reauthenticate {
                login_url: Some(login_url),
            },
            Err(e) => {
                warning!("{}", e);
                SessionExit::Reauthenticate { login_url: None }
            }
        }
    }
}

fn announce(outcome: &Outcome) {
    match outcome {
        Outcome::Idle => {}
        Outcome::Connected(device_id) => success!("🔊 Connected to device {}", device_id),
        Outcome::DeviceOffline => warning!("🛑 Device offline"),
        Outcome::Playing(track) => now_playing(track),
        Outcome::Liked(track) => info!("👍 Liked {}", track.name),
        Outcome::Disliked { track, next } => {
            info!("👎 Disliked {}, it won't be played again", track.name);
            if let Some(next) = next {
                now_playing(next);
            }
        }
        Outcome::Paused => info!("⏸ Paused"),
        Outcome::Resumed => info!("▶ Resumed"),
        Outcome::Volume(percent) => info!("🔉 Volume {}%", percent),
    }
}

fn now_playing(track: &Track) {
    success!("🦊 ♪ {} by {}", track.name, track.artist());
    if let Some(album) = track.album_name() {
        info!("   from {}", album);
    }
    if let Some(cover) = track.image_url() {
        info!("   cover {}", cover);
    }
}
