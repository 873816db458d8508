//! The registry: a namespace of named bags, created on demand.

use crate::bag::{Bag, JsonFileLoader, Loader, Namespace};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, OnceLock, RwLock};

/// A named collection of bags.
///
/// Bags are created lazily on first request. `vanish` discards the whole
/// namespace at once; bags already handed out keep working but are no
/// longer reachable through the registry.
pub struct Bilbo {
    bags: RwLock<Arc<Namespace>>,
}

impl Bilbo {
    /// A registry with an empty namespace.
    pub fn new() -> Self {
        Self {
            bags: RwLock::new(Arc::new(RwLock::new(HashMap::new()))),
        }
    }

    /// The conventionally shared process-wide registry.
    pub fn shared() -> &'static Bilbo {
        static SHARED: OnceLock<Bilbo> = OnceLock::new();
        SHARED.get_or_init(Bilbo::new)
    }

    /// A fresh registry with its own independent namespace.
    pub fn standalone(&self) -> Bilbo {
        Bilbo::new()
    }

    fn namespace(&self) -> Arc<Namespace> {
        Arc::clone(&self.bags.read().unwrap())
    }

    /// Returns the bag stored under `name`, creating a plain one first
    /// when absent.
    ///
    /// Names are coerced through their `Display` rendering before lookup,
    /// so distinct inputs with identical renderings land on the same bag.
    pub fn bag(&self, name: impl Display) -> Arc<Bag> {
        let name = name.to_string();
        let namespace = self.namespace();
        if let Some(bag) = namespace.read().unwrap().get(&name) {
            return Arc::clone(bag);
        }
        log::debug!("creating bag '{}'", name);
        let bag = Bag::new(name.clone());
        adopt(&namespace, name, &bag);
        bag
    }

    /// Builds a requiring bag over the filesystem JSON loader, replacing
    /// any bag already stored under `name`.
    pub fn requiring_bag(&self, name: impl Display, root: impl Into<String>) -> Arc<Bag> {
        self.requiring_bag_with(name, root, Arc::new(JsonFileLoader))
    }

    /// Builds a requiring bag over a caller-supplied loader, replacing any
    /// bag already stored under `name`.
    pub fn requiring_bag_with(
        &self,
        name: impl Display,
        root: impl Into<String>,
        loader: Arc<dyn Loader>,
    ) -> Arc<Bag> {
        let name = name.to_string();
        let bag = Bag::requiring(name.clone(), root, loader);
        adopt(&self.namespace(), name, &bag);
        bag
    }

    /// Builds a mocking bag, replacing any bag already stored under
    /// `name`.
    pub fn mocking_bag(&self, name: impl Display) -> Arc<Bag> {
        let name = name.to_string();
        let bag = Bag::mocking(name.clone());
        adopt(&self.namespace(), name, &bag);
        bag
    }

    /// Adopts an externally built bag under its own name, replacing any
    /// bag already stored there.
    pub fn keep(&self, bag: Arc<Bag>) {
        log::debug!("keeping bag '{}'", bag.name());
        adopt(&self.namespace(), bag.name().to_string(), &bag);
    }

    /// Discards the whole namespace, orphaning every stored bag.
    pub fn vanish(&self) {
        log::debug!("registry vanishing");
        *self.bags.write().unwrap() = Arc::new(RwLock::new(HashMap::new()));
    }
}

impl Default for Bilbo {
    fn default() -> Self {
        Self::new()
    }
}

fn adopt(namespace: &Arc<Namespace>, name: String, bag: &Arc<Bag>) {
    bag.attach(namespace);
    namespace.write().unwrap().insert(name, Arc::clone(bag));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stuff::value;

    #[test]
    fn test_bag_returns_the_same_bag_per_name() {
        let bilbo = Bilbo::new();
        let first = bilbo.bag("x");
        let again = bilbo.bag("x");
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn test_distinct_names_get_distinct_bags() {
        let bilbo = Bilbo::new();
        assert!(!Arc::ptr_eq(&bilbo.bag("x"), &bilbo.bag("y")));
    }

    #[test]
    fn test_names_are_coerced_through_display() {
        let bilbo = Bilbo::new();
        assert!(Arc::ptr_eq(&bilbo.bag(42), &bilbo.bag("42")));
    }

    #[test]
    fn test_vanish_detaches_existing_bags() {
        let bilbo = Bilbo::new();
        let before = bilbo.bag("x");
        bilbo.vanish();

        let after = bilbo.bag("x");
        assert!(!Arc::ptr_eq(&before, &after));

        before.stuff("a", value(1i64));
        assert!(before.grab("a").is_ok());
    }

    #[test]
    fn test_keep_adopts_external_bags() {
        let bilbo = Bilbo::new();
        let external = Bag::new("kept");
        bilbo.keep(Arc::clone(&external));
        assert!(Arc::ptr_eq(&bilbo.bag("kept"), &external));
    }

    #[test]
    fn test_specialized_bags_replace_existing_entries() {
        let bilbo = Bilbo::new();
        let plain = bilbo.bag("x");
        let mocking = bilbo.mocking_bag("x");
        assert!(!Arc::ptr_eq(&plain, &mocking));
        assert!(Arc::ptr_eq(&bilbo.bag("x"), &mocking));
    }

    #[test]
    fn test_standalone_registries_are_independent() {
        let bilbo = Bilbo::new();
        let other = bilbo.standalone();
        assert!(!Arc::ptr_eq(&bilbo.bag("x"), &other.bag("x")));
    }
}
