//! # Player Module
//!
//! The session/playback synchronization core. It keeps one credential, one
//! bound device and one "now playing" pointer consistent while player
//! notifications, network answers and user commands arrive in any order.
//!
//! ## Components
//!
//! - [`DeviceBinder`] - the device commands go to; every playback command is
//!   refused while nothing is bound
//! - [`EventReconciler`] - owns the skip guard and decides whether a state
//!   change is a genuine end of track or the echo of our own play command
//! - [`TrackQueue`] - fetches candidates, drops rejected tracks, starts the
//!   first playable one and handles like/dislike, chat requests and the
//!   transport controls
//! - [`Session`] - the loop that feeds notifications and commands to the
//!   queue one at a time and funnels every authentication failure into
//!   re-authentication
//!
//! ## Skip Guard
//!
//! ```text
//!            arm (play dispatched)
//! Listening ─────────────────────────▶ Guarded
//!     ▲                                   │
//!     └──── next state change (echo) ─────┘
//! ```
//!
//! While Listening, a state change reporting `paused` at position `0` with a
//! known duration means the track ran out and the queue advances.
//! Authentication errors and playback errors bypass the guard entirely.

mod controller;
mod device;
mod reconciler;
mod session;

pub use controller::{MAX_RETRIES, Outcome, TrackQueue};
pub use device::DeviceBinder;
pub use reconciler::{EventReconciler, GuardState, Reaction};
pub use session::{Session, SessionExit, UserCommand};
