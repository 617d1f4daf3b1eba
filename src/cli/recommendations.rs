use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    backend::{BackendClient, DjBackend},
    config, info,
    management::{CredentialManager, RejectedManager, RejectedStore},
    types::{Track, TrackTableRow},
    warning,
};

/// Prints what the DJ would pick from right now, disliked tracks removed.
pub async fn recommendations() {
    if let Err(e) = show_recommendations().await {
        warning!("{}", e);
    }
}

async fn show_recommendations() -> Res<()> {
    let mut store = CredentialManager::load().await?;
    let rejected = RejectedManager::load().await?;
    let backend = BackendClient::new(config::backend_url());

    let pb = ProgressBar::new_spinner();
    pb.set_message("Asking the DJ...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let tracks = fetch_candidates(&backend, &mut store, &rejected).await;
    pb.finish_and_clear();
    let tracks = tracks?;

    if tracks.is_empty() {
        info!("🎶 No new tracks.");
        return Ok(());
    }

    let rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Current recommendations for the stored credential, rejected tracks removed.
///
/// A credential the backend refuses is dropped from the store so the next
/// run asks for a login instead of reusing it.
pub async fn fetch_candidates(
    backend: &dyn DjBackend,
    store: &mut CredentialManager,
    rejected: &dyn RejectedStore,
) -> Res<Vec<Track>> {
    let Some(credential) = store.get() else {
        return Err("Not logged in. Run `fennec auth` first.".into());
    };

    match backend.recommendations(credential).await {
        Ok(tracks) => Ok(tracks
            .into_iter()
            .filter(|t| !rejected.contains(&t.id))
            .collect()),
        Err(e) if e.is_auth_invalid() => {
            store.clear().await?;
            Err(format!("{} Run `fennec auth` to log in again.", e).into())
        }
        Err(e) => Err(e.into()),
    }
}
