use thiserror::Error;

/// Everything a call against the status-page backend can fail with.
///
/// `statusdeck-core` maps these into its own `CoreError`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Bad email/password, or a bearer token the backend refused.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The token stopped being accepted mid-session.
    #[error("session expired; sign in again")]
    SessionExpired,

    #[error("no bearer token set; log in or configure a token first")]
    NotAuthenticated,

    // ── Transport ───────────────────────────────────────────────────
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("no response within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// CA bundle or client construction problem.
    #[error("TLS setup failed: {0}")]
    Tls(String),

    /// HTTP 429, with the backend's Retry-After.
    #[error("rate limited; retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Backend ─────────────────────────────────────────────────────
    /// Structured (or raw) error body returned with a non-2xx status.
    #[error("backend returned HTTP {status}: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// The body did not match the documented response schema.
    #[error("unexpected response body: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Signing in again could fix this.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Worth retrying as-is.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Machine-readable `code` from the error body.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
