mod auth;
mod credential;
mod rejected;

pub use auth::AuthSession;
pub use auth::AuthState;
pub use auth::resolve_credential;
pub use credential::CredentialManager;
pub use rejected::RejectedManager;
pub use rejected::RejectedStore;
