// statusdeck-api: Async Rust client for the status-page REST backend

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::{Credentials, Session, User};
pub use error::Error;
pub use rest::ApiClient;
pub use transport::{TlsMode, TransportConfig};
