use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};

use crate::{api, config, spotify::auth::RedirectSlot, warning};

/// Serves the login redirect target and a health check until the process ends.
pub async fn start_callback_server(slot: RedirectSlot) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/", get(api::callback))
        .route("/callback", get(api::callback))
        .layer(Extension(slot));

    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => {
            warning!("Failed to parse server address: {}", e);
            return;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            warning!("Cannot listen on {} for the login redirect: {}", addr, e);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        warning!("Callback server stopped: {}", e);
    }
}
