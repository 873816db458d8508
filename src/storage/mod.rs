//! Storage strategies: how producers become retrievable values.

pub mod resolve;
pub mod types;

pub use resolve::Resolution;
pub use types::{Resolver, StorageKind};
