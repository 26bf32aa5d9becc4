//! Per-run document cache
//!
//! Each resolution run owns one [`DocumentCache`] and clears it before walking,
//! so documents fetched by an earlier run are never visible to a later one.
//! Failed loads are cached too; a broken document is fetched once per run no
//! matter how many references point into it.

use std::collections::HashMap;

use tracing::trace;
use url::Url;

use crate::document::Node;
use crate::error::Result;

/// A loaded document, or the reason it could not be loaded
pub type CachedDocument = std::result::Result<Node, String>;

#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<Url, CachedDocument>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached document
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn insert(&mut self, url: Url, document: CachedDocument) {
        self.entries.insert(url, document);
    }

    #[cfg(test)]
    pub fn contains(&self, url: &Url) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached document for `url`, calling `load` on a miss
    pub fn get_or_load(
        &mut self,
        url: &Url,
        load: impl FnOnce() -> Result<Node>,
    ) -> std::result::Result<&Node, &str> {
        let entry = self.entries.entry(url.clone()).or_insert_with(|| {
            trace!(%url, "document cache miss");
            load().map_err(|e| e.to_string())
        });

        entry.as_ref().map_err(String::as_str)
    }
}
