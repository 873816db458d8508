//! Tagged registration inputs and the storage-marker convention.

use crate::stuff::constructor::Constructor;
use crate::stuff::object::Object;
use crate::stuff::types::Value;
use std::sync::Arc;

/// Marker field consulted first, U+3007 IDEOGRAPHIC NUMBER ZERO.
pub const MARKER_RING: &str = "\u{3007}";

/// Marker field consulted when the ring spelling yields nothing.
pub const MARKER_PRECIOUS: &str = "precious";

/// A boxed plain callable.
pub struct Callable {
    f: Box<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl Callable {
    /// Invokes the callable with the given arguments.
    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.f)(args)
    }
}

/// The raw input handed to registration, before any strategy wraps it.
#[derive(Clone)]
pub enum Producer {
    /// An opaque value, stored and returned as-is.
    Value(Value),
    /// A delegate object; doubles as the template for the prototype
    /// strategy.
    Object(Arc<Object>),
    /// A plain callable.
    Function(Arc<Callable>),
    /// A constructor-like callable.
    Constructor(Arc<Constructor>),
}

impl Producer {
    /// Wraps a closure into a callable producer.
    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Producer::Function(Arc::new(Callable { f: Box::new(f) }))
    }

    /// Reads the storage marker, ring spelling first.
    pub fn marker(&self) -> Option<String> {
        match self {
            Producer::Object(object) => marker_field(object, MARKER_RING)
                .or_else(|| marker_field(object, MARKER_PRECIOUS)),
            Producer::Constructor(ctor) => ctor.marker().map(str::to_string),
            _ => None,
        }
    }

    /// True for producers that can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Producer::Function(_) | Producer::Constructor(_))
    }

    /// The producer itself, viewed as a plain value.
    pub fn as_value(&self) -> Value {
        match self {
            Producer::Value(thing) => Arc::clone(thing),
            Producer::Object(object) => Arc::clone(object),
            Producer::Function(callable) => Arc::clone(callable),
            Producer::Constructor(ctor) => Arc::clone(ctor),
        }
    }
}

fn marker_field(object: &Object, field: &str) -> Option<String> {
    let found = object.get(field)?;
    if let Some(text) = found.downcast_ref::<String>() {
        return Some(text.clone());
    }
    found.downcast_ref::<&str>().map(|text| (*text).to_string())
}
