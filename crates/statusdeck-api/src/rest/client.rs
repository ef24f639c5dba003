// REST API HTTP client
//
// Wraps `reqwest::Client` with base-path normalization, bearer-token
// injection, envelope unwrapping and error-body parsing. Endpoint groups
// (services, incidents, ...) are inherent methods in sibling files.

use std::sync::{PoisonError, RwLock};

use reqwest::header::{AUTHORIZATION, HeaderValue, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use super::models::DataEnvelope;
use crate::error::Error;
use crate::transport::TransportConfig;

const API_PREFIX: &str = "api/v1";
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

// ── Error response shapes ────────────────────────────────────────────

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Nested { error: ErrorDetail },
    Flat(ErrorDetail),
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorBody {
    fn into_detail(self) -> ErrorDetail {
        match self {
            Self::Nested { error } => error,
            Self::Flat(detail) => detail,
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the status-page REST API.
///
/// Holds the bearer token behind an `RwLock` so a single client can log in
/// and then serve every later request. Requests made without a token are
/// sent anonymously; the backend decides whether that is allowed.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a server root URL and transport config.
    ///
    /// `base_url` is the server root (e.g. `https://status.example.com`);
    /// `/api/v1/` is appended unless already present.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            token: RwLock::new(None),
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/{API_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized API base (always ends with `/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Token management ─────────────────────────────────────────────

    /// Install a bearer token for all subsequent requests.
    pub fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Drop the stored token; later requests go out anonymously.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        let Some(token) = guard.as_ref() else {
            return Ok(req);
        };
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid bearer token header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(req.header(AUTHORIZATION, value))
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"incidents/inc_1/updates"`) onto the base.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url))?.send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url))?.json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self
            .authorize(self.http.patch(url))?
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url))?.send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Unwrap the `{"data": ...}` envelope. Any other shape is a loud
    /// deserialization error carrying a preview of the body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        trace!(body_len = body.len(), "response body");

        serde_json::from_str::<DataEnvelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return Error::RateLimited { retry_after_secs };
        }

        let raw = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .map(ErrorBody::into_detail);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            if self.has_token() {
                return Error::SessionExpired;
            }
            return Error::Authentication {
                message: detail
                    .and_then(|d| d.message)
                    .unwrap_or_else(|| "invalid credentials".into()),
            };
        }

        match detail {
            Some(ErrorDetail { message, code }) => Error::Api {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| status.to_string()),
                code,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            },
        }
    }
}
