use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Credentials for authenticating against the status-page backend.
///
/// Both variants end in a bearer token: `Token` carries one directly,
/// `Password` trades email + password for one via `auth/login`.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Pre-issued bearer token.
    Token(SecretString),

    /// Email/password login.
    Password { email: String, password: SecretString },
}

/// Organization the user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

/// The authenticated operator, as returned by `auth/login` and `auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
}

impl User {
    /// Name used when stamping timeline updates: the display name if set,
    /// the email otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A live session: the bearer token plus the user it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}
