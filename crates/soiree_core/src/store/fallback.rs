//! Numeric fallback cache keyed by owning collection.
//!
//! # Responsibility
//! - Hold scalar values (wallet budgets) the backend may not round-trip.
//! - Derive deterministic keys `<prefix>-<collectionId>`.
//!
//! # Invariants
//! - Stored values are plain numeric strings of finite numbers.
//! - `get` never fails: storage errors, corrupt text and non-finite numbers
//!   all read as a miss.
//! - `set`/`delete` failures are logged and swallowed.

use crate::store::kv::KeyValueStore;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key prefix used when no explicit configuration is supplied.
pub const DEFAULT_FALLBACK_PREFIX: &str = "wallet-budget";

static KEY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.:-]{0,63}$").expect("valid key prefix regex")
});

/// Invalid fallback configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackConfigError {
    InvalidKeyPrefix(String),
}

impl Display for FallbackConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeyPrefix(value) => write!(
                f,
                "invalid fallback key prefix `{value}`; expected 1-64 chars of [A-Za-z0-9_.:-]"
            ),
        }
    }
}

impl Error for FallbackConfigError {}

/// Fallback cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackConfig {
    key_prefix: String,
}

impl FallbackConfig {
    /// Validates and builds a configuration with a custom key prefix.
    pub fn new(key_prefix: impl Into<String>) -> Result<Self, FallbackConfigError> {
        let key_prefix = key_prefix.into();
        if !KEY_PREFIX_RE.is_match(&key_prefix) {
            return Err(FallbackConfigError::InvalidKeyPrefix(key_prefix));
        }
        Ok(Self { key_prefix })
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
        }
    }
}

/// Typed numeric cache over an injected [`KeyValueStore`].
pub struct FallbackStore<S: KeyValueStore> {
    store: S,
    config: FallbackConfig,
}

impl<S: KeyValueStore> FallbackStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, FallbackConfig::default())
    }

    pub fn with_config(store: S, config: FallbackConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &FallbackConfig {
        &self.config
    }

    /// Underlying storage capability.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Storage key for one collection.
    pub fn key_for(&self, collection_id: &str) -> String {
        format!("{}-{}", self.config.key_prefix, collection_id)
    }

    /// Reads the cached value for `collection_id`.
    pub fn get(&self, collection_id: &str) -> Option<f64> {
        if collection_id.trim().is_empty() {
            return None;
        }

        let key = self.key_for(collection_id);
        let raw = match self.store.get_raw(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(
                    "event=fallback_get module=store status=error key={} error={}",
                    key, err
                );
                return None;
            }
        };

        match parse_cached_number(&raw) {
            Some(value) => Some(value),
            None => {
                warn!(
                    "event=fallback_get module=store status=corrupt key={} raw_len={}",
                    key,
                    raw.len()
                );
                None
            }
        }
    }

    /// Writes `value` for `collection_id`, replacing any previous value.
    ///
    /// A non-finite `value` is not stored; the previous entry is dropped so
    /// later reads see the cache as empty rather than an older number.
    pub fn set(&self, collection_id: &str, value: f64) {
        if collection_id.trim().is_empty() {
            warn!("event=fallback_set module=store status=skipped reason=empty_collection_id");
            return;
        }
        if !value.is_finite() {
            warn!(
                "event=fallback_set module=store status=skipped reason=non_finite collection_id={}",
                collection_id
            );
            self.delete(collection_id);
            return;
        }

        let key = self.key_for(collection_id);
        match self.store.set_raw(&key, &value.to_string()) {
            Ok(()) => debug!("event=fallback_set module=store status=ok key={key}"),
            Err(err) => warn!(
                "event=fallback_set module=store status=error key={} error={}",
                key, err
            ),
        }
    }

    /// Removes the cached value for `collection_id`.
    pub fn delete(&self, collection_id: &str) {
        if collection_id.trim().is_empty() {
            return;
        }

        let key = self.key_for(collection_id);
        match self.store.delete(&key) {
            Ok(()) => debug!("event=fallback_delete module=store status=ok key={key}"),
            Err(err) => warn!(
                "event=fallback_delete module=store status=error key={} error={}",
                key, err
            ),
        }
    }
}

fn parse_cached_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
