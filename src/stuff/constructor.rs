//! Constructor-like producers backing the type and singleton strategies.

use crate::stuff::object::Object;
use crate::stuff::types::Value;
use std::sync::Arc;

/// Initializes a freshly allocated instance. Returning `Some` substitutes
/// the returned value for the instance.
pub type InitFn = dyn Fn(&Arc<Object>, &[Value]) -> Option<Value> + Send + Sync;

/// An initializer plus the prototype its instances delegate to.
pub struct Constructor {
    proto: Arc<Object>,
    init: Box<InitFn>,
    marker: Option<String>,
}

impl Constructor {
    /// Wraps an initializer into a constructor with a fresh prototype.
    pub fn new(
        init: impl Fn(&Arc<Object>, &[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            proto: Object::empty(),
            init: Box::new(init),
            marker: None,
        })
    }

    /// Same as [`Constructor::new`] with a storage marker attached.
    pub fn marked(
        marker: impl Into<String>,
        init: impl Fn(&Arc<Object>, &[Value]) -> Option<Value> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            proto: Object::empty(),
            init: Box::new(init),
            marker: Some(marker.into()),
        })
    }

    /// The prototype every constructed instance delegates to.
    pub fn proto(&self) -> &Arc<Object> {
        &self.proto
    }

    /// The attached storage marker, when one was given.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    /// Allocates an instance delegating to the prototype and runs the
    /// initializer with `args`. When the initializer produces a
    /// replacement, the replacement is returned verbatim instead of the
    /// instance.
    pub fn construct(&self, args: &[Value]) -> Value {
        let instance = Object::with_parent(Arc::clone(&self.proto));
        if let Some(replacement) = (self.init)(&instance, args) {
            return replacement;
        }
        instance
    }

    /// True when `value` is an object whose delegate chain passes through
    /// this constructor's prototype.
    pub fn instance_of(&self, value: &Value) -> bool {
        let instance = match value.downcast_ref::<Object>() {
            Some(object) => object,
            None => return false,
        };
        let mut ancestor = instance.parent();
        while let Some(object) = ancestor {
            if Arc::ptr_eq(&object, &self.proto) {
                return true;
            }
            ancestor = object.parent();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stuff::types::value;

    #[test]
    fn test_construct_runs_the_initializer() {
        let ctor = Constructor::new(|this, _args| {
            this.set("ready", value(true));
            None
        });

        let instance = ctor.construct(&[]);
        let object = instance.downcast_ref::<Object>().unwrap();
        assert!(object.has_own("ready"));
    }

    #[test]
    fn test_construct_forwards_arguments() {
        let ctor = Constructor::new(|this, args| {
            if let Some(first) = args.first() {
                this.set("given", Arc::clone(first));
            }
            None
        });

        let instance = ctor.construct(&[value(7i64)]);
        let object = instance.downcast_ref::<Object>().unwrap();
        let given = object.get("given").unwrap();
        assert_eq!(*given.downcast_ref::<i64>().unwrap(), 7);
    }

    #[test]
    fn test_construct_returns_the_replacement() {
        let replacement = value(String::from("stand-in"));
        let stand_in = Arc::clone(&replacement);
        let ctor = Constructor::new(move |_this, _args| Some(Arc::clone(&stand_in)));

        let produced = ctor.construct(&[]);
        assert!(Arc::ptr_eq(&produced, &replacement));
    }

    #[test]
    fn test_instance_of_walks_the_delegate_chain() {
        let ctor = Constructor::new(|_this, _args| None);

        let instance = ctor.construct(&[]);
        assert!(ctor.instance_of(&instance));

        let direct = instance.downcast::<Object>().unwrap();
        let descendant: Value = Object::with_parent(direct);
        assert!(ctor.instance_of(&descendant));
    }

    #[test]
    fn test_instance_of_rejects_foreign_values() {
        let ctor = Constructor::new(|_this, _args| None);
        let other = Constructor::new(|_this, _args| None);

        assert!(!ctor.instance_of(&value(5i64)));
        assert!(!ctor.instance_of(&other.construct(&[])));
    }
}
