//! HTTP client for the remote place/user API.
//!
//! Thin wrappers over reqwest: every non-2xx response carries an
//! `{isSuccess, message}` envelope whose message is surfaced verbatim in the
//! alert modal. The place-list read sits behind [`RemotePlaces`] so the cache
//! can be exercised against scripted remotes in tests.

use std::error::Error;
use std::fmt;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::state::Place;

/// Error envelope returned by the API for non-2xx responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Always `false` on error responses.
    pub is_success: bool,
    /// Human-readable error message.
    pub message: String,
}

/// Remote user record returned by login/register.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Remote user id.
    pub id: String,
    /// User display name.
    pub name: String,
}

/// API failure: either the server said no (with its message) or the request
/// never completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered non-2xx; `message` comes from the error envelope.
    Server {
        /// Envelope message, passed through to the user verbatim.
        message: String,
    },
    /// Transport-level failure (connection, timeout, body decode).
    Transport {
        /// Stringified cause.
        message: String,
    },
}

impl ApiError {
    /// The message as shown in the alert modal.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Server { message } | ApiError::Transport { message } => message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport {
            message: e.to_string(),
        }
    }
}

/// Read side of the place API, as consumed by the place cache.
pub trait RemotePlaces {
    /// Fetch all places owned by `user_id`.
    fn places_for(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Place>, ApiError>> + Send;
}

/// Payload for creating a place.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlace {
    /// Place name (required).
    pub name: String,
    /// Latitude, when marked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, when marked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Optional reminder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_message: Option<String>,
    /// Optional reminder date (wire format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    /// Initial disable state (auto-activate inverts this).
    pub is_disable: bool,
    /// Owning user id.
    pub user_id: String,
}

/// Partial update payload; only set fields are sent. Covers both the edit
/// form (name, position, reminder fields, active toggle) and the bare
/// enable/disable toggle.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceUpdate {
    /// Id of the place to update.
    pub id: String,
    /// New name, when changing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New latitude, when changing the position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// New longitude, when changing the position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// New reminder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_message: Option<String>,
    /// New reminder date (wire format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    /// New disable state, when toggling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disable: Option<bool>,
}

/// HTTP client bound to a base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    /// Shared reqwest client.
    http: reqwest::Client,
    /// API base, e.g. `http://localhost:3000/api`.
    base_url: String,
}

impl ApiClient {
    /// Client for `base_url` (trailing slash tolerated).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `POST /user/login` with `{name, password}`.
    ///
    /// # Errors
    /// `ApiError::Server` with the envelope message on rejection,
    /// `ApiError::Transport` when the request never completes.
    pub async fn login(&self, name: &str, password: &str) -> Result<User, ApiError> {
        let url = format!("{}/user/login", self.base_url);
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "name": name, "password": password }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(resp.json::<User>().await?)
    }

    /// `POST /user` registering `{name, password}`.
    ///
    /// # Errors
    /// Same split as [`ApiClient::login`].
    pub async fn register(&self, name: &str, password: &str) -> Result<User, ApiError> {
        let url = format!("{}/user", self.base_url);
        let resp = self
            .http
            .post(url)
            .json(&serde_json::json!({ "name": name, "password": password }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(resp.json::<User>().await?)
    }

    /// `POST /place` creating a place; returns the server's record.
    ///
    /// # Errors
    /// Same split as [`ApiClient::login`].
    pub async fn create_place(&self, place: &NewPlace) -> Result<Place, ApiError> {
        let url = format!("{}/place", self.base_url);
        let resp = self.http.post(url).json(place).send().await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(resp.json::<Place>().await?)
    }

    /// `PUT /place` with a partial update (also used for enable/disable).
    /// Returns the server's updated record for write-through into the cache.
    ///
    /// # Errors
    /// Same split as [`ApiClient::login`].
    pub async fn update_place(&self, update: &PlaceUpdate) -> Result<Place, ApiError> {
        let url = format!("{}/place", self.base_url);
        let resp = self.http.put(url).json(update).send().await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(resp.json::<Place>().await?)
    }

    /// `DELETE /place/{id}`.
    ///
    /// # Errors
    /// Same split as [`ApiClient::login`].
    pub async fn delete_place(&self, place_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/place/{place_id}", self.base_url);
        let resp = self.http.delete(url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(())
    }

    /// Decode the error envelope, falling back to the HTTP status when the
    /// body is not an envelope.
    async fn server_error(resp: reqwest::Response) -> ApiError {
        let status = resp.status();
        match resp.json::<ResponseEnvelope>().await {
            Ok(env) => ApiError::Server {
                message: env.message,
            },
            Err(_) => ApiError::Server {
                message: format!("HTTP {status}"),
            },
        }
    }
}

impl RemotePlaces for ApiClient {
    async fn places_for(&self, user_id: &str) -> Result<Vec<Place>, ApiError> {
        let url = format!("{}/place", self.base_url);
        let resp = self
            .http
            .get(url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::server_error(resp).await);
        }
        Ok(resp.json::<Vec<Place>>().await?)
    }
}
