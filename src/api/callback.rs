use axum::{Extension, extract::Query, response::Html};

use crate::{spotify::auth::RedirectSlot, types::RedirectParams};

/// Receives the backend's post-login redirect.
///
/// Both `access_token` and `user_id` have to be present and non-empty;
/// anything less is refused and the slot stays untouched.
pub async fn callback(
    Query(params): Query<RedirectParams>,
    Extension(slot): Extension<RedirectSlot>,
) -> Html<&'static str> {
    let Some(credential) = params.credential() else {
        return Html("<h4>Missing access token or user id.</h4>");
    };

    *slot.lock().await = Some(credential);
    Html("<h2>Logged in.</h2><p>You can close this window and return to fennec.</p>")
}
