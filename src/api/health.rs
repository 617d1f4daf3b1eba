use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::spotify::auth::RedirectSlot;

pub async fn health(Extension(slot): Extension<RedirectSlot>) -> Json<Value> {
    let redirect_received = slot.lock().await.is_some();
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "redirect_received": redirect_received,
    }))
}
