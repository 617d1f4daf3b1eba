use std::sync::Arc;

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    backend::{BackendClient, DjBackend},
    cli::auth::login,
    config, info,
    management::{AuthSession, AuthState, CredentialManager, RejectedManager},
    player::{Session, SessionExit, TrackQueue, UserCommand},
    server,
    spotify::{PlayerApi, PlayerWatcher, SpotifyClient, auth::RedirectSlot},
    success,
    types::Credential,
    utils::{self, PROMPT_HELP, PromptLine},
    warning,
};

/// Runs an interactive listening session until the user quits.
///
/// A rejected credential ends the current session only: the user is sent
/// to the login page and a fresh session starts with the new credential.
pub async fn play(slot: RedirectSlot, autostart: bool) {
    tokio::spawn(server::start_callback_server(Arc::clone(&slot)));

    let (command_tx, mut commands) = mpsc::channel::<UserCommand>(16);
    tokio::spawn(read_prompt(command_tx));

    let backend: Arc<dyn DjBackend> = Arc::new(BackendClient::new(config::backend_url()));
    let spotify = Arc::new(SpotifyClient::new(config::spotify_apiurl()));
    let player: Arc<dyn PlayerApi> = spotify.clone();

    let mut from_redirect: Option<Credential> = None;

    loop {
        let store = match CredentialManager::load().await {
            Ok(store) => store,
            Err(e) => {
                warning!("Cannot open session store: {}", e);
                return;
            }
        };
        let mut auth = AuthSession::new(store, Arc::clone(&player), Arc::clone(&backend));

        let credential = match auth.bootstrap(from_redirect.take()).await {
            Ok(AuthState::Authenticated(credential)) => credential,
            Ok(AuthState::Redirect { login_url }) => {
                match login(Arc::clone(&slot), &login_url).await {
                    Some(credential) => {
                        from_redirect = Some(credential);
                        continue;
                    }
                    None => return,
                }
            }
            Err(e) => {
                warning!("{}", e);
                return;
            }
        };
        success!("Logged in as {}", credential.user_id());

        let rejected = match RejectedManager::load().await {
            Ok(rejected) => rejected,
            Err(e) => {
                warning!("Cannot load disliked tracks: {}", e);
                return;
            }
        };
        if rejected.count() > 0 {
            info!("{} disliked tracks will be skipped.", rejected.count());
        }

        let queue = TrackQueue::new(
            credential.clone(),
            Arc::clone(&backend),
            Arc::clone(&player),
            Box::new(rejected),
        );

        let (event_tx, events) = mpsc::channel(32);
        let watcher = PlayerWatcher::new(
            Arc::clone(&spotify),
            credential,
            config::preferred_device(),
            config::poll_interval(),
        )
        .spawn(event_tx);

        info!("Waiting for a Spotify device… open Spotify on any device.");
        let exit = Session::new(auth, queue)
            .with_autostart(autostart)
            .run(events, &mut commands)
            .await;
        watcher.abort();

        match exit {
            SessionExit::Quit => {
                info!("Bye.");
                return;
            }
            SessionExit::Reauthenticate { login_url: Some(login_url) } => {
                match login(Arc::clone(&slot), &login_url).await {
                    Some(credential) => from_redirect = Some(credential),
                    None => return,
                }
            }
            // the next bootstrap finds no credential and asks for a login url again
            SessionExit::Reauthenticate { login_url: None } => {}
        }
    }
}

async fn read_prompt(commands: mpsc::Sender<UserCommand>) {
    info!("Type `help` for the list of commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match utils::parse_prompt_line(&line) {
            Ok(PromptLine::Command(command)) => {
                let quit = command == UserCommand::Quit;
                if commands.send(command).await.is_err() || quit {
                    return;
                }
            }
            Ok(PromptLine::Help) => println!("{}", PROMPT_HELP),
            Ok(PromptLine::Blank) => {}
            Err(e) => warning!("{}", e),
        }
    }
}
