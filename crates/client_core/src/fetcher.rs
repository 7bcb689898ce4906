use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::User, error::FetchError};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";
const USERS_PATH: &str = "users";

/// Single-shot source of the user list. Callers retry by calling again.
#[async_trait]
pub trait UserFetcher: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError>;
}

pub struct HttpUserFetcher {
    http: Client,
    users_url: Url,
}

impl HttpUserFetcher {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_client(Client::new(), base_url)
    }

    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::network(err.to_string()))?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            users_url: users_url(base_url)?,
        })
    }

    pub fn users_url(&self) -> &Url {
        &self.users_url
    }
}

#[async_trait]
impl UserFetcher for HttpUserFetcher {
    async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        debug!(url = %self.users_url, "fetching users");
        let body = self
            .http
            .get(self.users_url.clone())
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(transport_error)?
            .bytes()
            .await
            .map_err(transport_error)?;

        let users: Vec<User> = serde_json::from_slice(&body).map_err(|err| {
            warn!(url = %self.users_url, error = %err, "users response did not decode");
            FetchError::decode(err.to_string())
        })?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }
}

fn transport_error(err: reqwest::Error) -> FetchError {
    if let Some(status) = err.status() {
        return FetchError::network(format!("HTTP {status}"));
    }
    if err.is_timeout() {
        return FetchError::network("timeout");
    }
    FetchError::network(err.to_string())
}

fn users_url(base_url: &str) -> Result<Url, FetchError> {
    let trimmed = base_url.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    Url::parse(&normalized)
        .and_then(|base| base.join(USERS_PATH))
        .map_err(|err| FetchError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: err.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/fetcher_tests.rs"]
mod tests;
