use crate::types::PlayerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    #[default]
    Listening,
    /// The next state-change notification is an echo of our own command.
    Guarded,
}

/// What the session should do about a player notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Bind(String),
    Unbind,
    Advance,
    /// An echo was discarded and the guard released.
    Swallowed,
    Ignore,
    Reauthenticate(String),
    Log(String),
}

/// Tells echoes of controller-issued commands apart from genuine track ends.
///
/// The skip guard lives here and nowhere else. Arming it makes the next
/// state-change notification an echo; consuming that one notification
/// disarms it again, so a single arm can never hide more than one event.
#[derive(Debug, Default)]
pub struct EventReconciler {
    state: GuardState,
}

impl EventReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn arm_guard(&mut self) {
        self.state = GuardState::Guarded;
    }

    pub fn is_guarded(&self) -> bool {
        self.state == GuardState::Guarded
    }

    pub fn disarm_guard(&mut self) {
        self.state = GuardState::Listening;
    }

    pub fn reconcile(&mut self, event: &PlayerEvent) -> Reaction {
        match event {
            PlayerEvent::Ready { device_id } => Reaction::Bind(device_id.clone()),
            PlayerEvent::NotReady { .. } => Reaction::Unbind,
            // out of band: the guard has no say over these two
            PlayerEvent::AuthenticationError(reason) => Reaction::Reauthenticate(reason.clone()),
            PlayerEvent::PlaybackError(_) => Reaction::Advance,
            PlayerEvent::InitializationError(message) => {
                Reaction::Log(format!("Player initialization error: {message}"))
            }
            PlayerEvent::AccountError(message) => {
                Reaction::Log(format!("Player account error: {message}"))
            }
            PlayerEvent::StateChanged(None) => Reaction::Ignore,
            PlayerEvent::StateChanged(Some(state)) => {
                if self.is_guarded() {
                    self.disarm_guard();
                    return Reaction::Swallowed;
                }

                if state.is_natural_end() {
                    Reaction::Advance
                } else {
                    Reaction::Ignore
                }
            }
        }
    }
}
