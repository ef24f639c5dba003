// ── Runtime connection configuration ──
//
// These types describe *how* to reach a status-page backend. They carry
// credential data and connection tuning but never touch disk: the CLI
// builds a `ControllerConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default backend location when no profile overrides it.
pub const DEFAULT_SERVER: &str = "http://localhost:3000";

/// How to authenticate with the backend.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Pre-issued bearer token.
    Token(SecretString),
    /// Email/password login that yields a bearer token.
    Password { email: String, password: SecretString },
}

impl From<&AuthCredentials> for statusdeck_api::Credentials {
    fn from(auth: &AuthCredentials) -> Self {
        match auth {
            AuthCredentials::Token(token) => Self::Token(token.clone()),
            AuthCredentials::Password { email, password } => Self::Password {
                email: email.clone(),
                password: password.clone(),
            },
        }
    }
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs on self-hosted backends).
    DangerAcceptInvalid,
}

/// Configuration for one backend connection.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Backend root URL (e.g. `https://status.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Author recorded on timeline updates. Falls back to the
    /// authenticated user's display name when unset.
    pub author: Option<String>,
    /// How often to perform a full refresh (seconds). 0 = never.
    pub refresh_interval_secs: u64,
}

impl ControllerConfig {
    /// Config with default tuning for the given URL and credentials.
    pub fn new(url: Url, auth: AuthCredentials) -> Self {
        Self {
            url,
            auth,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            author: None,
            refresh_interval_secs: 0,
        }
    }
}
