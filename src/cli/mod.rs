//! # CLI Module
//!
//! The user-facing commands of fennec. Each command wires the configured
//! collaborators together, drives the library components and reports every
//! outcome through the status macros.
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - asks the DJ backend for its login page, follows it in the
//!   browser and stores the credential the redirect delivers
//!
//! ### Listening
//!
//! - [`play`] - the interactive session: the callback server, the stdin
//!   prompt, the player watcher and the [`Session`](crate::player::Session)
//!   loop; re-runs the login whenever the credential is rejected
//!
//! ### Inspection
//!
//! - [`recommendations`] - the current candidate list without the disliked
//!   tracks, rendered as a table; a refused credential is dropped from the
//!   store
//! - [`rejected`] - every disliked track id
//!
//! ## Data Flow
//!
//! ```text
//! stdin prompt ──UserCommand──┐
//!                             ├──▶ Session ──▶ TrackQueue ──▶ DJ backend
//! player watcher ─PlayerEvent─┘                    └────────▶ Spotify player
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! fennec auth                  # log in once
//! fennec play --autostart      # listen; start as soon as a device shows up
//! fennec recommendations       # peek at the candidates
//! fennec rejected              # what will never be played again
//! ```
//!
//! ## Error Handling
//!
//! Commands never abort the process. The work behind a command returns
//! [`Res`](crate::Res) and the command prints the error as one warning;
//! inside `play` the prompt stays interactive.

mod auth;
mod play;
mod recommendations;
mod rejected;

pub use auth::auth;
pub use play::play;
pub use recommendations::{fetch_candidates, recommendations};
pub use rejected::rejected;
