//! Miss handling: synthesizing entries for absent keys.

use crate::bag::loader::Loader;
use crate::errors::BilboError;
use crate::storage::{Resolver, StorageKind};
use crate::stuff::{Object, Producer};
use std::sync::Arc;

/// Synthesizes a resolver for a key a bag does not hold yet.
pub trait MissHandler: Send + Sync {
    /// Produces the resolver to install under `key`, or fails.
    fn synthesize(&self, key: &str) -> Result<Resolver, BilboError>;
}

/// Loads missing keys from `root + key` through a host-supplied loader.
pub struct RequireOnMiss {
    root: String,
    loader: Arc<dyn Loader>,
}

impl RequireOnMiss {
    /// Builds a handler rooted at `root`.
    pub fn new(root: impl Into<String>, loader: Arc<dyn Loader>) -> Self {
        Self {
            root: root.into(),
            loader,
        }
    }
}

impl MissHandler for RequireOnMiss {
    fn synthesize(&self, key: &str) -> Result<Resolver, BilboError> {
        let location = format!("{}{}", self.root, key);
        let producer = self.loader.load(&location)?;
        let kind = producer
            .marker()
            .and_then(|marker| StorageKind::from_marker(&marker))
            .unwrap_or(StorageKind::Stuff);
        log::debug!("required '{}' from '{}' as {}", key, location, kind);
        Ok(Resolver { kind, producer })
    }
}

/// Hands out a fresh empty object for any missing key.
pub struct MockOnMiss;

impl MissHandler for MockOnMiss {
    fn synthesize(&self, key: &str) -> Result<Resolver, BilboError> {
        log::debug!("mocking '{}'", key);
        Ok(Resolver {
            kind: StorageKind::Stuff,
            producer: Producer::Object(Object::empty()),
        })
    }
}
