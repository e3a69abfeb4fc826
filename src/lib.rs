// Authguard - authenticated HTTP client layer with automatic token refresh

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod store;

pub use auth::{
    HttpRefreshClient, LogoutHandler, RefreshClient, RequestSigner, SessionFailureHandler,
    Token, TokenAuthenticator, TokenPair,
};
pub use client::AuthHttpClient;
pub use config::AuthConfig;
pub use error::{ClientError, RefreshError};
pub use store::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
