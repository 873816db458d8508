//! # BILBO CORE LIBRARY
//!
//! **NAMED DEPENDENCY BAGS WITH PLUGGABLE STORAGE STRATEGIES**
//!
//! **ARCHITECTURE**: Modular design with a strategy-driven resolution engine
//! **GUARANTEE**: Memoized lazy/singleton production with once-only side effects
//! **COMPATIBILITY**: Host-supplied module loading behind the `Loader` trait

pub mod bag;
pub mod errors;
pub mod registry;
pub mod storage;
pub mod stuff;

pub use bag::{Bag, JsonFileLoader, Loader, MissHandler};
pub use errors::BilboError;
pub use registry::Bilbo;
pub use storage::{Resolution, Resolver, StorageKind};
pub use stuff::{value, Callable, Constructor, Object, Producer, Value};
