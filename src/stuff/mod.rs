//! The dynamic value model: values, delegate objects, constructors,
//! producers.

pub mod constructor;
pub mod object;
pub mod producer;
pub mod types;

pub use constructor::{Constructor, InitFn};
pub use object::Object;
pub use producer::{Callable, Producer, MARKER_PRECIOUS, MARKER_RING};
pub use types::{value, Value};
