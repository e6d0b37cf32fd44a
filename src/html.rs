//! HTML querying over fetched content.
//!
//! Query operations are explicit and enumerated: each one offloads
//! parse-plus-query to the blocking pool and hands back owned [`Element`]
//! data. scraper's DOM is not `Send`, so the document is re-parsed from
//! the raw text inside each offloaded call rather than held across await
//! points.

use std::collections::HashMap;
use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use crate::error::HtmlError;

/// Owned snapshot of one matched element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag name, lowercased (`"a"`, `"div"`).
    pub name: String,
    /// Outer HTML of the element.
    pub html: String,
    /// Concatenated text content.
    pub text: String,
    /// Attribute name to value.
    pub attrs: HashMap<String, String>,
}

impl Element {
    fn capture(el: ElementRef<'_>) -> Self {
        Self {
            name: el.value().name().to_string(),
            html: el.html(),
            text: el.text().collect(),
            attrs: el
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Queryable wrapper over the raw HTML of a response body.
///
/// Cheap to clone; the underlying text is shared.
#[derive(Debug, Clone)]
pub struct Document {
    raw: Arc<String>,
}

impl Document {
    /// Wrap raw HTML text for querying.
    pub fn parse(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(raw.into()),
        }
    }

    /// The raw HTML text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// First element matching a CSS selector.
    pub async fn select_one(&self, selector: &str) -> Result<Option<Element>, HtmlError> {
        let mut matched = self.query(selector.to_owned(), Some(1)).await?;
        Ok(matched.pop())
    }

    /// All elements matching a CSS selector, in document order.
    pub async fn select_all(&self, selector: &str) -> Result<Vec<Element>, HtmlError> {
        self.query(selector.to_owned(), None).await
    }

    /// First element with the given tag name.
    pub async fn find(&self, tag: &str) -> Result<Option<Element>, HtmlError> {
        self.select_one(tag).await
    }

    /// All elements with the given tag name.
    pub async fn find_all(&self, tag: &str) -> Result<Vec<Element>, HtmlError> {
        self.select_all(tag).await
    }

    async fn query(
        &self,
        selector: String,
        limit: Option<usize>,
    ) -> Result<Vec<Element>, HtmlError> {
        let raw = Arc::clone(&self.raw);
        tokio::task::spawn_blocking(move || {
            let parsed = Selector::parse(&selector)
                .map_err(|_| HtmlError::InvalidSelector(selector.clone()))?;
            let doc = Html::parse_document(&raw);
            let mut out = Vec::new();
            for el in doc.select(&parsed) {
                out.push(Element::capture(el));
                if limit.is_some_and(|l| out.len() >= l) {
                    break;
                }
            }
            Ok(out)
        })
        .await
        .map_err(|e| HtmlError::TaskFailed(e.to_string()))?
    }
}
