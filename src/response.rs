//! The result of one completed fetch.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::error::HtmlError;
use crate::html::Document;

/// Body payload of a 200 response.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Raw body bytes (the default).
    Bytes(Bytes),
    /// Body decoded as JSON (`as_json` fetches).
    Json(serde_json::Value),
}

/// Result of one fetch, constructed once the HTTP call (including any
/// retries) has resolved. Immutable thereafter.
///
/// `content` is `Some` only when the final status was exactly 200; every
/// other status still yields a full `Response` with headers, cookies and
/// URLs, and is not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The URL that was requested.
    pub request_url: String,
    /// The URL after any redirects.
    pub response_url: String,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response cookies, name to value.
    pub cookies: HashMap<String, String>,
    /// HTTP status code.
    pub status_code: u16,
    /// Body payload, present only for status 200.
    pub content: Option<Content>,
}

impl Response {
    /// Whether the fetch ended in a 200 with content attached.
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// Raw body bytes, if the fetch was a non-JSON 200.
    pub fn bytes(&self) -> Option<&Bytes> {
        match &self.content {
            Some(Content::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    /// Decoded JSON body, if the fetch was a 200 with `as_json`.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.content {
            Some(Content::Json(v)) => Some(v),
            _ => None,
        }
    }

    /// Body as text (lossy UTF-8), if raw bytes are present.
    pub fn text(&self) -> Option<Cow<'_, str>> {
        self.bytes().map(|b| String::from_utf8_lossy(b))
    }

    /// Wrap the body for HTML querying.
    ///
    /// Fails when there is nothing textual to parse: a content-less
    /// non-200 response, or a body already decoded as JSON.
    pub fn html(&self) -> Result<Document, HtmlError> {
        match &self.content {
            Some(Content::Bytes(b)) => {
                Ok(Document::parse(String::from_utf8_lossy(b).into_owned()))
            }
            Some(Content::Json(_)) => Err(HtmlError::NotHtml("body was decoded as JSON")),
            None => Err(HtmlError::NotHtml("response has no content")),
        }
    }
}
