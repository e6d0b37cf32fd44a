//! Shared client holder.
//!
//! Exactly one pooled `reqwest::Client` exists per requester lifetime;
//! every concurrent fetch borrows it through [`SharedClient::acquire`].
//! reqwest clients are handles onto a shared connection pool, so the
//! clone handed out by `acquire` reuses the same connections.

use std::time::Duration;

use async_lock::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{redirect, Client};

use crate::agent;
use crate::error::FetchError;

/// Construction-time transport configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Default user-agent; one is picked from the pool when unset.
    pub user_agent: Option<String>,
    /// Transport timeout applied to every request.
    pub timeout: Duration,
    /// Whether redirects are followed. The transport fixes the redirect
    /// policy per client, so this is a client setting rather than a
    /// request option.
    pub allow_redirects: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: Duration::from_secs(30),
            allow_redirects: true,
        }
    }
}

/// Holder for the one long-lived HTTP client.
pub struct SharedClient {
    inner: RwLock<Option<Client>>,
    user_agent: String,
}

impl SharedClient {
    /// Build the client. Its default header set carries the user-agent;
    /// per-request headers override it.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| agent::random_user_agent().to_string());
        let ua_value = HeaderValue::from_str(&user_agent)
            .map_err(|_| FetchError::Config(format!("invalid user-agent: {user_agent:?}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, ua_value);

        let policy = if config.allow_redirects {
            redirect::Policy::limited(10)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .redirect(policy)
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            inner: RwLock::new(Some(client)),
            user_agent,
        })
    }

    /// Borrow the live client, or fail once [`close`](Self::close) has run.
    pub async fn acquire(&self) -> Result<Client, FetchError> {
        self.inner
            .read()
            .await
            .clone()
            .ok_or(FetchError::ClientClosed)
    }

    /// Release the client and its pooled connections. Idempotent.
    pub async fn close(&self) {
        self.inner.write().await.take();
    }

    pub async fn is_closed(&self) -> bool {
        self.inner.read().await.is_none()
    }

    /// The default user-agent this client sends.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
