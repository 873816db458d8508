//! The standard bag: a named key-to-resolver store.

use crate::bag::loader::Loader;
use crate::bag::miss::{MissHandler, MockOnMiss, RequireOnMiss};
use crate::errors::BilboError;
use crate::storage::{Resolver, StorageKind};
use crate::stuff::{Constructor, Object, Producer, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

/// The name-to-bag mapping a registry owns.
pub(crate) type Namespace = RwLock<HashMap<String, Arc<Bag>>>;

/// A named container mapping keys to resolvers.
pub struct Bag {
    name: String,
    entries: RwLock<HashMap<String, Resolver>>,
    on_miss: Option<Box<dyn MissHandler>>,
    owner: RwLock<Option<Weak<Namespace>>>,
}

impl Bag {
    /// A plain bag with no miss handling.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Self::build(name, None)
    }

    /// A bag that loads missing keys from `root` through `loader`.
    pub fn requiring(
        name: impl Into<String>,
        root: impl Into<String>,
        loader: Arc<dyn Loader>,
    ) -> Arc<Self> {
        Self::build(name, Some(Box::new(RequireOnMiss::new(root, loader))))
    }

    /// A bag that synthesizes an empty object for any missing key.
    pub fn mocking(name: impl Into<String>) -> Arc<Self> {
        Self::build(name, Some(Box::new(MockOnMiss)))
    }

    fn build(name: impl Into<String>, on_miss: Option<Box<dyn MissHandler>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
            on_miss,
            owner: RwLock::new(None),
        })
    }

    /// The bag's name within its owning registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grabs the value stored under `key` with no arguments.
    pub fn grab(&self, key: &str) -> Result<Value, BilboError> {
        self.grab_with(key, &[])
    }

    /// Grabs the value stored under `key`, forwarding `args` to callable
    /// producers.
    ///
    /// A miss consults the bag's miss handler when it has one; the
    /// synthesized entry is installed first, so later grabs for the same
    /// key hit it directly. A producer that grabs its own key during its
    /// own execution has unspecified results.
    pub fn grab_with(&self, key: &str, args: &[Value]) -> Result<Value, BilboError> {
        let known = self.entries.read().unwrap().get(key).cloned();
        let resolver = match known {
            Some(resolver) => resolver,
            None => self.synthesize(key)?,
        };

        let resolution = resolver.resolve(key, args)?;
        if let Some(replacement) = resolution.replacement {
            self.entries
                .write()
                .unwrap()
                .insert(key.to_string(), replacement);
        }
        Ok(resolution.value)
    }

    fn synthesize(&self, key: &str) -> Result<Resolver, BilboError> {
        let handler = match &self.on_miss {
            Some(handler) => handler,
            None => {
                return Err(BilboError::NotFound {
                    key: key.to_string(),
                })
            }
        };
        let resolver = handler.synthesize(key)?;
        self.install(key, resolver.clone());
        Ok(resolver)
    }

    /// Stores a value returned as-is by every grab.
    pub fn stuff(&self, key: &str, thing: Value) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Stuff,
                producer: Producer::Value(thing),
            },
        );
    }

    /// Stores a template; every grab returns a fresh object delegating
    /// to it.
    pub fn prototype(&self, key: &str, template: Arc<Object>) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Prototype,
                producer: Producer::Object(template),
            },
        );
    }

    /// Stores a function invoked on the first grab only; the result is
    /// kept and handed out from then on, whatever the later arguments.
    pub fn lazy(&self, key: &str, f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Lazy,
                producer: Producer::function(f),
            },
        );
    }

    /// Stores a function invoked fresh on every grab.
    pub fn factory(&self, key: &str, f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Factory,
                producer: Producer::function(f),
            },
        );
    }

    /// Stores a constructor instantiated fresh on every grab. (`type` in
    /// the marker vocabulary; the bare word is reserved in Rust.)
    pub fn type_(&self, key: &str, ctor: Arc<Constructor>) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Type,
                producer: Producer::Constructor(ctor),
            },
        );
    }

    /// Stores a constructor instantiated on the first grab only; the
    /// instance is kept and handed out from then on.
    pub fn singleton(&self, key: &str, ctor: Arc<Constructor>) {
        self.install(
            key,
            Resolver {
                kind: StorageKind::Singleton,
                producer: Producer::Constructor(ctor),
            },
        );
    }

    /// Convention-based registration: the producer's marker picks the
    /// strategy; unmarked callables become singletons, anything else is
    /// stored as stuff.
    pub fn register(&self, key: &str, producer: Producer) {
        let hinted = producer
            .marker()
            .and_then(|marker| StorageKind::from_marker(&marker));
        let kind = match hinted {
            Some(kind) => kind,
            None if producer.is_callable() => StorageKind::Singleton,
            None => StorageKind::Stuff,
        };
        self.install(key, Resolver { kind, producer });
    }

    /// The raw installer behind the per-strategy methods. Overwrites any
    /// previous entry for `key`, memoized or not.
    pub fn install(&self, key: &str, resolver: Resolver) {
        log::debug!("bag '{}': storing '{}' as {}", self.name, key, resolver.kind);
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), resolver);
    }

    /// Drops every entry, keeping the bag itself usable.
    pub fn empty(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Empties the bag and withdraws it from its owning registry, when a
    /// live one exists.
    pub fn vanish(&self) {
        self.empty();
        let owner = self.owner.read().unwrap().clone();
        if let Some(namespace) = owner.and_then(|weak| weak.upgrade()) {
            namespace.write().unwrap().remove(&self.name);
        }
    }

    pub(crate) fn attach(&self, namespace: &Arc<Namespace>) {
        *self.owner.write().unwrap() = Some(Arc::downgrade(namespace));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stuff::value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingLoader {
        loads: AtomicUsize,
    }

    impl Loader for CountingLoader {
        fn load(&self, location: &str) -> Result<Producer, BilboError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let object = Object::empty();
            object.set("location", value(location.to_string()));
            Ok(Producer::Object(object))
        }
    }

    #[test]
    fn test_install_overwrites_silently() {
        let bag = Bag::new("test");
        bag.stuff("a", value(1i64));
        bag.stuff("a", value(2i64));

        let grabbed = bag.grab("a").unwrap();
        assert_eq!(*grabbed.downcast_ref::<i64>().unwrap(), 2);
    }

    #[test]
    fn test_empty_clears_in_place() {
        let bag = Bag::new("test");
        bag.stuff("a", value(1i64));
        bag.empty();
        bag.empty();

        assert!(matches!(
            bag.grab("a"),
            Err(BilboError::NotFound { .. })
        ));

        bag.stuff("a", value(3i64));
        assert_eq!(*bag.grab("a").unwrap().downcast_ref::<i64>().unwrap(), 3);
    }

    #[test]
    fn test_vanish_without_an_owner_is_safe() {
        let bag = Bag::new("test");
        bag.stuff("a", value(1i64));
        bag.vanish();
        bag.vanish();

        assert!(bag.grab("a").is_err());
    }

    #[test]
    fn test_requiring_bags_load_each_key_once() {
        let loader = Arc::new(CountingLoader {
            loads: AtomicUsize::new(0),
        });
        let bag = Bag::requiring("test", "./fixtures/", Arc::clone(&loader));

        let first = bag.grab("a").unwrap();
        let second = bag.grab("a").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.loads.load(Ordering::SeqCst), 1);

        let object = first.downcast_ref::<Object>().unwrap();
        let location = object.get("location").unwrap();
        assert_eq!(
            location.downcast_ref::<String>().unwrap().as_str(),
            "./fixtures/a"
        );
    }

    #[test]
    fn test_mocking_bags_synthesize_once_per_key() {
        let bag = Bag::mocking("test");

        let first = bag.grab("anything").unwrap();
        let second = bag.grab("anything").unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let other = bag.grab("something else").unwrap();
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
