//! Configuration management for the fennec terminal DJ.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory. Every key has a default so
//! a fresh install talks to a backend on `localhost:8000` without any setup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

/// Name of the application directory below the platform data directory.
pub const APP_DIR: &str = "fennec";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `fennec` data directory if it doesn't exist yet. A missing
/// `.env` file is not an error; every key falls back to its default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/fennec/.env`
/// - macOS: `~/Library/Application Support/fennec/.env`
/// - Windows: `%LOCALAPPDATA%/fennec/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Returns the platform local data directory for fennec.
///
/// Falls back to the current directory when the platform has no data dir.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Returns the base URL of the DJ backend.
///
/// Reads `DJ_BACKEND_URL`, defaulting to `http://localhost:8000`. The
/// backend serves `/recommendations`, `/feedback`, `/command` and `/login`.
pub fn backend_url() -> String {
    var_or("DJ_BACKEND_URL", "http://localhost:8000")
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, defaulting to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// Returns the address the redirect callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:5501`. The DJ backend
/// redirects the browser here once the provider login completes.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", "127.0.0.1:5501")
}

/// Returns the preferred playback device id, if one is configured.
///
/// Reads `SPOTIFY_DEVICE_ID`. Without it the watcher binds the active
/// device, or the first device Spotify lists.
pub fn preferred_device() -> Option<String> {
    env::var("SPOTIFY_DEVICE_ID")
        .ok()
        .filter(|id| !id.trim().is_empty())
}

/// Returns how often the player watcher polls Spotify.
///
/// Reads `PLAYER_POLL_INTERVAL_MS`, defaulting to one second, never below 100ms.
pub fn poll_interval() -> Duration {
    Duration::from_millis(parse_or("PLAYER_POLL_INTERVAL_MS", 1000).max(100))
}

/// Returns how long the login flow waits for the redirect callback.
///
/// Reads `LOGIN_TIMEOUT_SECS`, defaulting to two minutes.
pub fn login_timeout() -> Duration {
    Duration::from_secs(parse_or("LOGIN_TIMEOUT_SECS", 120))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}
