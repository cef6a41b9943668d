//! Memoization of the load and preprocess stages, keyed by input content.

use std::collections::HashMap;
use std::sync::Arc;

use infrep_workbook::WorkbookLoader;
use sha2::{Digest, Sha256};

use crate::error::ReportError;
use crate::pipeline::{prepare, Prepared};

/// Caches [`Prepared`] inputs by the SHA-256 of the workbook bytes.
///
/// Meant for long-lived callers that see the same upload repeatedly, such as
/// a service re-rendering a report. A single `infrep` invocation loads one
/// file once, so there it only ever misses.
///
/// A disabled cache still answers every call; it just never stores.
/// Failed loads are not cached.
#[derive(Debug, Default)]
pub struct ReportCache {
    enabled: bool,
    entries: HashMap<String, Arc<Prepared>>,
    hits: u64,
    misses: u64,
}

impl ReportCache {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Hex SHA-256 of `bytes`.
    #[must_use]
    pub fn content_key(bytes: &[u8]) -> String {
        format!("{:x}", Sha256::digest(bytes))
    }

    /// Returns the prepared inputs for `bytes`, loading them on a miss.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`prepare`].
    pub fn get_or_prepare(
        &mut self,
        loader: &WorkbookLoader,
        bytes: &[u8],
    ) -> Result<Arc<Prepared>, ReportError> {
        if !self.enabled {
            return prepare(loader, bytes).map(Arc::new);
        }

        let key = Self::content_key(bytes);
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!(key = %key, "report cache hit");
            return Ok(Arc::clone(hit));
        }

        self.misses += 1;
        let prepared = Arc::new(prepare(loader, bytes)?);
        self.entries.insert(key, Arc::clone(&prepared));
        Ok(prepared)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since construction.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
