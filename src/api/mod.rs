//! # API Module
//!
//! HTTP endpoints of the local redirect callback server.
//!
//! ## Overview
//!
//! fennec never sees the provider's authorization code. The DJ backend runs
//! the OAuth code exchange and then redirects the browser back to fennec with
//! the resulting credential in the query string:
//!
//! ```text
//! http://127.0.0.1:5501/?access_token=BQC...&user_id=alice
//! ```
//!
//! ## Endpoints
//!
//! - [`callback`] - Accepts that redirect (at `/` and `/callback`) and hands
//!   the credential to the waiting login flow. A redirect missing either
//!   parameter is rejected, since half a credential is no credential.
//! - [`health`] - Status and version for checking the server is up.
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Binds these handlers to `SERVER_ADDRESS`
//! - [`crate::spotify::auth`] - Waits for the credential the callback stores

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
