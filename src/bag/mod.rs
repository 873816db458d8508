//! Bags: the standard container plus requiring and mocking variants.

pub mod loader;
pub mod miss;
pub mod standard;

pub use loader::{producer_from_json, JsonFileLoader, Loader};
pub use miss::{MissHandler, MockOnMiss, RequireOnMiss};
pub use standard::Bag;

pub(crate) use standard::Namespace;
