//! Document loading
//!
//! [`load_spec`] reads the root specification from disk. Referenced documents
//! are fetched through the [`DocumentLoader`] trait so the resolver can be
//! driven by an in-memory loader in tests.

use std::path::Path;
use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::document::{self, Node};
use crate::error::Result;
use crate::error::fetch::{failed as fetch_failed, unsupported_scheme};
use crate::error::fs::read_failed;

/// Fetches the raw text of a document addressed by URL
pub trait DocumentLoader {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Loader for `file:` URLs and `http(s):` URLs
pub struct DefaultLoader {
    client: reqwest::blocking::Client,
}

impl DefaultLoader {
    /// Create a loader whose remote requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("refbundle/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    fn fetch_remote(&self, url: &Url) -> Result<String> {
        debug!(%url, "fetching remote document");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| fetch_failed(url.as_str(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(url.as_str(), format!("HTTP {status}")));
        }

        response
            .text()
            .map_err(|e| fetch_failed(url.as_str(), e.to_string()))
    }
}

impl DocumentLoader for DefaultLoader {
    fn fetch(&self, url: &Url) -> Result<String> {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| fetch_failed(url.as_str(), "not a local file path"))?;
                debug!(path = %path.display(), "reading referenced document");
                read_text(&path)
            }
            "http" | "https" => self.fetch_remote(url),
            _ => Err(unsupported_scheme(url.as_str())),
        }
    }
}

/// Fetch and parse a referenced document
pub fn load_document(loader: &impl DocumentLoader, url: &Url) -> Result<Node> {
    let text = loader.fetch(url)?;
    document::parse(&text, url.as_str())
}

/// Read and parse the root specification
pub fn load_spec(path: &Path) -> Result<Node> {
    let text = read_text(path)?;
    document::parse(&text, &path.display().to_string())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| read_failed(path.display().to_string(), e.to_string()))
}
