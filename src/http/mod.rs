//! HTTP engine: shared client holder, single-request fetcher, retry wrapper.

pub mod client;
pub mod fetch;
pub mod retry;

pub use client::{ClientConfig, SharedClient};
pub use fetch::{Auth, Method, RequestOptions};
pub use retry::{with_retry, RetryPolicy};
