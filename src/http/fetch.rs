//! Single-request fetcher: one network round trip, no internal retry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderMap, COOKIE};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::FetchError;
use crate::response::{Content, Response};

/// The supported request methods.
///
/// Anything else fails [`Method::from_str`] with
/// [`FetchError::UnsupportedMethod`] before a request is ever built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Options,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

impl FromStr for Method {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "patch" => Ok(Method::Patch),
            "options" => Ok(Method::Options),
            other => Err(FetchError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Request authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    Basic {
        username: String,
        password: Option<String>,
    },
    Bearer(String),
}

/// Per-request options, passed through to the transport uninterpreted.
///
/// The recognized fields are enumerated; `timeout` is the
/// transport-specific escape hatch (a per-request override of the client
/// timeout). Redirect behavior is a client setting, see
/// [`ClientConfig`](crate::http::ClientConfig).
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub auth: Option<Auth>,
    /// JSON request body.
    pub json: Option<serde_json::Value>,
    /// Form-encoded request body.
    pub form: Option<HashMap<String, String>>,
    /// Query parameters appended to the URL.
    pub params: Option<Vec<(String, String)>>,
    /// Cookies sent with the request.
    pub cookies: Option<HashMap<String, String>>,
    /// Request headers. When unset, the client's default headers apply;
    /// when set, same-named defaults are overridden.
    pub headers: Option<HeaderMap>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Serialize `body` as the JSON request payload.
    pub fn json_body(mut self, body: &impl Serialize) -> Result<Self, FetchError> {
        self.json = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn form(mut self, form: HashMap<String, String>) -> Self {
        self.form = Some(form);
        self
    }

    pub fn params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Execute one HTTP call through the shared client.
///
/// A 200 status reads the body, decoding it as JSON when `as_json` is
/// set; a decode failure is an error (and retryable upstream). Any other
/// status is a valid terminal result with `content: None`.
pub(crate) async fn fetch_once(
    client: &Client,
    url: &str,
    method: Method,
    as_json: bool,
    options: &RequestOptions,
) -> Result<Response, FetchError> {
    let mut req = client.request(method.into(), url);

    if let Some(headers) = &options.headers {
        req = req.headers(headers.clone());
    }
    if let Some(params) = &options.params {
        req = req.query(params);
    }
    if let Some(json) = &options.json {
        req = req.json(json);
    }
    if let Some(form) = &options.form {
        req = req.form(form);
    }
    if let Some(cookies) = &options.cookies {
        req = req.header(COOKIE, cookie_header(cookies));
    }
    if let Some(timeout) = options.timeout {
        req = req.timeout(timeout);
    }
    match &options.auth {
        Some(Auth::Basic { username, password }) => {
            req = req.basic_auth(username, password.as_ref());
        }
        Some(Auth::Bearer(token)) => req = req.bearer_auth(token),
        None => {}
    }

    let resp = req.send().await?;

    let status = resp.status().as_u16();
    let response_url = resp.url().to_string();
    let headers = resp.headers().clone();
    let cookies = resp
        .cookies()
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect();

    let content = if status == 200 {
        let body = resp.bytes().await?;
        if as_json {
            Some(Content::Json(serde_json::from_slice(&body)?))
        } else {
            Some(Content::Bytes(body))
        }
    } else {
        None
    };

    debug!(%url, %method, status, "fetch completed");

    Ok(Response {
        request_url: url.to_string(),
        response_url,
        headers,
        cookies,
        status_code: status,
        content,
    })
}

fn cookie_header(cookies: &HashMap<String, String>) -> String {
    cookies
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
