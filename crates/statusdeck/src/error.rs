//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text
//! and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use statusdeck_config::ConfigError;
use statusdeck_core::{CoreError, ValidationError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the backend at {url}: {reason}")]
    #[diagnostic(
        code(statusdeck::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Override the URL with --server or: statusdeck config set server <url>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(statusdeck::auth_failed),
        help(
            "Verify the token or email/password for this profile.\n\
             Store a new one with: statusdeck config set-secret token"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(statusdeck::no_credentials),
        help(
            "Configure credentials with: statusdeck config init\n\
             Or pass --token / set STATUSDECK_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(statusdeck::not_found),
        help("Run: statusdeck {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Backend error ({status}): {message}")]
    #[diagnostic(code(statusdeck::api_error))]
    ApiError { status: String, message: String },

    #[error("Backend sent data statusdeck cannot use: {message}")]
    #[diagnostic(
        code(statusdeck::invalid_data),
        help("The backend may be running an incompatible version.")
    )]
    InvalidData { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(statusdeck::validation))]
    Validation { field: String, reason: String },

    #[error("Rejected: {0}")]
    #[diagnostic(code(statusdeck::rejected))]
    Rejected(#[source] ValidationError),

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(statusdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: statusdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No profile configured and no --server given")]
    #[diagnostic(
        code(statusdeck::no_config),
        help(
            "Create a profile with: statusdeck config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(statusdeck::config))]
    Config(ConfigError),

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(statusdeck::timeout),
        help("Increase the timeout with --timeout or check the backend.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Internal(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Rejected(_) | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    pub fn not_found(resource_type: &str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command_for(resource_type).into(),
        }
    }
}

fn list_command_for(resource_type: &str) -> &'static str {
    match resource_type {
        "service" => "services list",
        "group" => "groups list",
        "incident" => "incidents list --all",
        "maintenance" => "maintenance list --all",
        _ => "status",
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Disconnected => Self::ConnectionFailed {
                url: "(disconnected)".into(),
                reason: "backend connection was lost".into(),
            },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { .. } => Self::Timeout,
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::not_found(&entity_type, identifier),
            CoreError::ValidationFailed(e) => Self::Rejected(e),
            CoreError::InvalidData { message } => Self::InvalidData { message },
            CoreError::Api {
                message, status, ..
            } => Self::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn not_found_from_core_points_at_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "maintenance".into(),
            identifier: "mnt_1".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        let CliError::NotFound { list_command, .. } = err else {
            panic!("expected NotFound");
        };
        assert_eq!(list_command, "maintenance list --all");
    }

    #[test]
    fn rejected_transition_is_a_usage_error() {
        let err = CliError::from(CoreError::ValidationFailed(
            ValidationError::TransitionNotAllowed {
                kind: "maintenance",
                from: "scheduled".into(),
                to: "completed".into(),
            },
        ));
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("scheduled to completed"));
    }

    #[test]
    fn missing_credentials_exit_with_auth_code() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "prod".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
