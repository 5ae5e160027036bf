/*!
 * Article fetching and HTML-to-text extraction.
 *
 * `ArticleFetcher` downloads a page and strips it down to a plain-text
 * `Document`: title from the `<title>` element, body via html2text. The
 * extraction is deliberately simple; pages that need scripting or paywall
 * handling are out of scope.
 */

use async_trait::async_trait;
use html2text::from_read;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::document::Document;
use crate::errors::AppError;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

static URL_IN_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Anything that can turn a URL into a plain-text document
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch and extract the document behind the given URL
    async fn fetch(&self, url: &str) -> Result<Document, AppError>;
}

/// HTTP fetcher producing plain-text documents from article pages
pub struct ArticleFetcher {
    client: Client,
}

impl ArticleFetcher {
    /// Create a fetcher with sane request defaults
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("articast/1.0")
                .build()
                .unwrap_or_default(),
        }
    }

    /// Extract the page title, falling back to the URL host when the page
    /// has none
    fn extract_title(html: &str, url: &Url) -> String {
        TITLE_RE
            .captures(html)
            .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| url.host_str().unwrap_or("Untitled").to_string())
    }

    /// Convert page HTML into readable plain text
    fn extract_body(html: &str) -> String {
        let plain_text = from_read(html.as_bytes(), usize::MAX);
        let without_urls = URL_IN_TEXT_RE.replace_all(&plain_text, "");
        without_urls.trim().to_string()
    }
}

impl Default for ArticleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentFetcher for ArticleFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, AppError> {
        let parsed_url =
            Url::parse(url).map_err(|e| AppError::Fetch(format!("Invalid URL '{}': {}", url, e)))?;

        debug!("Fetching article from {}", parsed_url);
        let response = self
            .client
            .get(parsed_url.clone())
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!(
                "Fetching {} returned HTTP {}",
                url, status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("Reading body of {} failed: {}", url, e)))?;

        let title = Self::extract_title(&html, &parsed_url);
        let body = Self::extract_body(&html);
        if body.is_empty() {
            return Err(AppError::Fetch(format!("No readable text found at {}", url)));
        }

        let document = Document::new(title, body);
        debug!(
            "Fetched '{}': {} words of text",
            document.title, document.word_count
        );
        Ok(document)
    }
}
