use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

use crate::{info, types::Credential, warning};

/// Slot the redirect callback server drops a fresh credential into.
pub type RedirectSlot = Arc<Mutex<Option<Credential>>>;

/// Sends the user to the provider login and waits for the redirect.
///
/// The DJ backend performs the OAuth code exchange and redirects the browser
/// to the local callback server with `access_token` and `user_id` query
/// parameters. The callback server must already be running on `slot`.
///
/// # Arguments
///
/// * `slot` - Shared slot the callback handler writes the credential into
/// * `login_url` - Provider consent page returned by the backend's `/login`
/// * `max_wait` - How long to wait before giving up
///
/// # Returns
///
/// Returns `Some(Credential)` once the redirect arrived, `None` on timeout.
///
/// # Browser Handling
///
/// If no browser can be opened the URL is printed so the user can paste it
/// manually; waiting continues either way.
pub async fn follow_login(
    slot: RedirectSlot,
    login_url: &str,
    max_wait: Duration,
) -> Option<Credential> {
    // a credential left over from an earlier redirect is stale by now
    slot.lock().await.take();

    info!("Opening the Spotify login in your browser…");
    if webbrowser::open(login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    wait_for_credential(slot, max_wait).await
}

/// Polls the redirect slot once per second until a credential shows up.
///
/// # Timeout Behavior
///
/// - Maximum wait time: `max_wait`
/// - Polling interval: 1 second
/// - A spinner shows that fennec is still waiting
async fn wait_for_credential(slot: RedirectSlot, max_wait: Duration) -> Option<Credential> {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for the login redirect...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let start = Instant::now();
    while start.elapsed() < max_wait {
        if let Some(credential) = slot.lock().await.take() {
            pb.finish_and_clear();
            return Some(credential);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    None
}
