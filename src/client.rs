//! High-level entry point: [`Requester`] with builder and wave batching.
//!
//! Single-request convenience calls go through the retry wrapper; batch
//! calls additionally chunk the URL list into fixed-size waves and join
//! each wave before the next one starts.

use std::time::Duration;

use async_stream::try_stream;
use futures_util::future::try_join_all;
use futures_util::Stream;
use tracing::debug;

use crate::error::FetchError;
use crate::http::client::{ClientConfig, SharedClient};
use crate::http::fetch::{self, Method, RequestOptions};
use crate::http::retry::{self, RetryPolicy};
use crate::response::Response;

/// Concurrent fetcher over one shared HTTP client.
///
/// Lifecycle: built (`Created`), serving calls (`Active`), then
/// [`close`](Self::close)d, after which every call fails with
/// [`FetchError::ClientClosed`].
pub struct Requester {
    shared: SharedClient,
    retry: RetryPolicy,
    step: usize,
}

impl Requester {
    pub fn builder() -> RequesterBuilder {
        RequesterBuilder::default()
    }

    /// A requester with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::builder().build()
    }

    // ── Single-request convenience calls ─────────────────────────────────

    pub async fn get(
        &self,
        url: &str,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        self.fetch(url, Method::Get, as_json, options).await
    }

    pub async fn post(
        &self,
        url: &str,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        self.fetch(url, Method::Post, as_json, options).await
    }

    pub async fn put(
        &self,
        url: &str,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        self.fetch(url, Method::Put, as_json, options).await
    }

    pub async fn patch(
        &self,
        url: &str,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        self.fetch(url, Method::Patch, as_json, options).await
    }

    pub async fn options(
        &self,
        url: &str,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        self.fetch(url, Method::Options, as_json, options).await
    }

    /// One logical fetch: a single HTTP call wrapped by the retry policy.
    pub async fn fetch(
        &self,
        url: &str,
        method: Method,
        as_json: bool,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        retry::with_retry(&self.retry, || async move {
            let client = self.shared.acquire().await?;
            fetch::fetch_once(&client, url, method, as_json, options).await
        })
        .await
    }

    // ── Batch orchestration ──────────────────────────────────────────────

    /// Fetch `urls` in consecutive waves of up to `step` URLs, yielding
    /// one group of responses per wave, in wave order.
    ///
    /// The stream is lazy and non-restartable: wave N+1 is not launched
    /// until the consumer polls past wave N, and dropping the stream
    /// cancels the in-flight wave as a unit. A fetch that exhausts its
    /// retries fails its whole wave; the error is yielded and the stream
    /// ends with later waves never started.
    pub fn collect_data(
        &self,
        urls: Vec<String>,
        method: Method,
        as_json: bool,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<Vec<Response>, FetchError>> + '_ {
        try_stream! {
            // guards the empty-input chunks(0) panic; the builder already
            // enforces step >= 1
            let step = self.step.min(urls.len()).max(1);
            let waves = urls.len().div_ceil(step);
            for (index, wave) in urls.chunks(step).enumerate() {
                debug!(wave = index + 1, waves, size = wave.len(), "starting wave");
                let group = try_join_all(
                    wave.iter()
                        .map(|url| self.fetch(url, method, as_json, &options)),
                )
                .await?;
                yield group;
            }
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Release the shared client. Further calls fail with
    /// [`FetchError::ClientClosed`]. Idempotent.
    pub async fn close(&self) {
        self.shared.close().await;
    }

    pub async fn is_closed(&self) -> bool {
        self.shared.is_closed().await
    }

    /// The default user-agent sent when a request overrides nothing.
    pub fn user_agent(&self) -> &str {
        self.shared.user_agent()
    }

    /// Configured wave size.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct RequesterBuilder {
    step: usize,
    user_agent: Option<String>,
    timeout: Duration,
    allow_redirects: bool,
    retry: RetryPolicy,
}

impl Default for RequesterBuilder {
    fn default() -> Self {
        Self {
            step: 10,
            user_agent: None,
            timeout: Duration::from_secs(30),
            allow_redirects: true,
            retry: RetryPolicy::default(),
        }
    }
}

impl RequesterBuilder {
    /// Wave size for batch calls. Must be at least 1.
    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Fixed user-agent instead of one picked from the pool.
    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    /// Transport timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether the client follows redirects.
    pub fn allow_redirects(mut self, allow: bool) -> Self {
        self.allow_redirects = allow;
        self
    }

    /// Retry policy for every fetch.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<Requester, FetchError> {
        if self.step == 0 {
            return Err(FetchError::Config("step must be at least 1".into()));
        }
        let shared = SharedClient::new(ClientConfig {
            user_agent: self.user_agent,
            timeout: self.timeout,
            allow_redirects: self.allow_redirects,
        })?;
        Ok(Requester {
            shared,
            retry: self.retry,
            step: self.step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn builder_defaults() {
        let requester = Requester::new().unwrap();
        assert_eq!(requester.step(), 10);
        assert_eq!(requester.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn zero_step_is_rejected() {
        let result = Requester::builder().step(0).build();
        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[tokio::test]
    async fn calls_fail_after_close() {
        let requester = Requester::new().unwrap();
        requester.close().await;
        assert!(requester.is_closed().await);

        let err = requester
            .get("http://localhost/ignored", false, &RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ClientClosed));
    }

    #[tokio::test]
    async fn empty_batch_yields_no_waves() {
        let requester = Requester::new().unwrap();
        let stream = requester.collect_data(vec![], Method::Get, false, RequestOptions::new());
        tokio::pin!(stream);
        assert!(stream.next().await.is_none());
    }
}
