//! The shared value currency for everything a bag can hold.

use std::any::Any;
use std::sync::Arc;

/// A dynamically typed, shareable value handed out by `grab`.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Boxes a concrete thing into the shared [`Value`] currency.
pub fn value<T: Any + Send + Sync>(thing: T) -> Value {
    Arc::new(thing)
}
