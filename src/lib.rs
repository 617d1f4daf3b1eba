//! Fennec - a terminal DJ on top of Spotify
//!
//! This library drives a listening session against two collaborators: a DJ
//! backend that picks tracks and takes feedback, and the Spotify player that
//! actually plays them. It keeps the credential, the bound device and the
//! playing track consistent while player notifications and user commands
//! race each other.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local login redirect server
//! - `backend` - DJ backend client (recommendations, feedback, chat, login)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - The error type shared by every session component
//! - `management` - Credential and rejected-track storage, auth session
//! - `player` - Device binding, track queue, skip guard and session loop
//! - `server` - Local HTTP server receiving the login redirect
//! - `spotify` - Spotify Web API player client and watcher
//! - `types` - Data structures and type definitions
//! - `utils` - Prompt parsing helpers

pub mod api;
pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod management;
pub mod player;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed-error result used by the CLI commands.
///
/// Session components return [`errors::DjError`]; a command's helper
/// collapses those and its own messages into this alias and the command
/// prints the result once.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line tagged with a blue `o`.
///
/// ```
/// info!("Opening the Spotify login in your browser…");
/// info!("Volume {}%", percent);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line tagged with a green `✓`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for start-up failures in `main`. Nothing inside a running session
/// may end the process.
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem tagged with a yellow `!`.
///
/// Every session failure ends up here; the prompt stays interactive.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
