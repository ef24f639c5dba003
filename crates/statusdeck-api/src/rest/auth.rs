// Authentication endpoints

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::client::ApiClient;
use super::models::{LoginRequest, LoginResponse, MeResponse};
use crate::auth::{Credentials, Session, User};
use crate::error::Error;

impl ApiClient {
    /// Exchange email + password for a bearer token.
    ///
    /// On success the token is stored on the client.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, Error> {
        self.clear_token();
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let resp: LoginResponse = self.post("auth/login", &body).await?;
        debug!(user = %resp.user.email, "login succeeded");

        let token = SecretString::from(resp.token);
        self.set_token(token.clone());
        Ok(Session {
            token,
            user: resp.user,
        })
    }

    /// Fetch the user that owns the current token.
    pub async fn me(&self) -> Result<User, Error> {
        if !self.has_token() {
            return Err(Error::NotAuthenticated);
        }
        let resp: MeResponse = self.get("auth/me").await?;
        Ok(resp.user)
    }

    /// Authenticate with either credential kind and return the session.
    ///
    /// Tokens are verified with `auth/me` so a bad token fails here
    /// rather than on the first data request.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session, Error> {
        match credentials {
            Credentials::Token(token) => {
                self.set_token(token.clone());
                let user = self.me().await.map_err(|e| {
                    self.clear_token();
                    match e {
                        Error::SessionExpired => Error::Authentication {
                            message: "token rejected by server".into(),
                        },
                        other => other,
                    }
                })?;
                Ok(Session {
                    token: token.clone(),
                    user,
                })
            }
            Credentials::Password { email, password } => self.login(email, password).await,
        }
    }
}
