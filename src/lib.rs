//! # wavefetch
//!
//! Batched concurrent HTTP fetching over one shared client.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — `Response`/`Content` values, error types, user-agent pool
//! 2. **HTTP engine** — shared client holder, single-request fetcher,
//!    fixed-delay retry wrapper
//! 3. **Orchestration** — `Requester` with convenience calls and
//!    wave-batched `collect_data`
//! 4. **HTML access** — `Document` with enumerated query operations
//!    offloaded to the blocking pool
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wavefetch::prelude::*;
//!
//! let requester = Requester::builder().step(10).build()?;
//!
//! let page = requester.get("https://example.com", false, &RequestOptions::new()).await?;
//! let title = page.html()?.select_one("title").await?;
//!
//! let urls: Vec<String> = (1..=25).map(|n| format!("https://example.com/{n}")).collect();
//! let waves = requester.collect_data(urls, Method::Get, true, RequestOptions::new());
//! tokio::pin!(waves);
//! while let Some(group) = waves.next().await {
//!     for response in group? {
//!         println!("{} -> {}", response.request_url, response.status_code);
//!     }
//! }
//! requester.close().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Crate error types.
pub mod error;

/// The result of one completed fetch.
pub mod response;

/// Default user-agent strings.
pub mod agent;

// ── Layer 2: HTTP engine ─────────────────────────────────────────────────────

/// Shared client, single-request fetcher, retry wrapper.
pub mod http;

// ── Layer 3: Orchestration ───────────────────────────────────────────────────

/// `Requester` — the primary entry point.
pub mod client;

// ── Layer 4: HTML access ─────────────────────────────────────────────────────

/// HTML querying over fetched content.
pub mod html;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::agent::random_user_agent;
    pub use crate::client::{Requester, RequesterBuilder};
    pub use crate::error::{FetchError, HtmlError};
    pub use crate::html::{Document, Element};
    pub use crate::http::{Auth, ClientConfig, Method, RequestOptions, RetryPolicy, SharedClient};
    pub use crate::response::{Content, Response};
}
