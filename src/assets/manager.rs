//! Asset manager: the single entry point templates resolve assets through.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::config::AppConfig;
use crate::debug;

use super::{AssetError, AssetResolver, AssetType};

/// Resolves logical asset paths to URLs, caching each result.
///
/// Shared process-wide across all request threads. The cache is append-only
/// plus full-clear (no per-key invalidation), which keeps a reader/writer
/// lock sufficient. Resolution work happens outside the lock; only the map
/// access itself is locked.
pub struct AssetManager {
    resolver: AssetResolver,
    cache: RwLock<FxHashMap<String, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AssetManager {
    pub fn new(resolver: AssetResolver) -> Self {
        Self {
            resolver,
            cache: RwLock::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Build the manager for the configured environment. In production this
    /// loads the manifest; a corrupt (or, in strict mode, absent) manifest
    /// fails startup rather than running with unusable asset serving.
    pub fn from_config(config: &AppConfig) -> Result<Self, AssetError> {
        Ok(Self::new(AssetResolver::from_config(config)?))
    }

    /// Best-effort resolution for templates. On failure, logs and returns
    /// an empty string: a missing asset must degrade to a broken link, not
    /// fail the whole page render.
    pub fn asset_path(&self, path: &str) -> String {
        match self.resolve_asset_path(path) {
            Ok(url) => url,
            Err(e) => {
                debug!("assets"; "failed to resolve `{path}`: {e}");
                String::new()
            }
        }
    }

    /// Strict resolution. Empty paths fail with [`AssetError::InvalidPath`];
    /// other failures surface to callers that opted into handling them.
    ///
    /// For a fixed path and resolver configuration, repeated calls return
    /// an identical string (templates and integrity tooling rely on this).
    pub fn resolve_asset_path(&self, path: &str) -> Result<String, AssetError> {
        if path.is_empty() {
            return Err(AssetError::InvalidPath);
        }

        if let Some(url) = self.cache.read().get(path) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(url.clone());
        }

        // Resolve outside the lock: lock hold time stays bounded by map
        // operations no matter what resolution costs.
        let url = self.resolver.resolve(path)?;
        self.misses.fetch_add(1, Ordering::Relaxed);

        self.cache.write().insert(path.to_string(), url.clone());
        Ok(url)
    }

    /// Classify a path by extension. Pure; no cache involvement.
    pub fn asset_type(&self, path: &str) -> AssetType {
        AssetType::from_path(path)
    }

    /// Atomically replace the cache with an empty one. Administrative use
    /// only; never called on the request path.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write();
        let dropped = cache.len();
        *cache = FxHashMap::default();
        drop(cache);
        debug!("assets"; "cleared path cache ({dropped} entries)");
    }

    /// Cache hit/miss counters since startup.
    pub fn cache_stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }
}
