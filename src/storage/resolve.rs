//! Resolution: producing a value from a stored entry.

use crate::errors::BilboError;
use crate::storage::types::{Resolver, StorageKind};
use crate::stuff::{Object, Producer, Value};
use std::sync::Arc;

/// The outcome of resolving an entry: the produced value, plus the entry
/// that must replace the resolved one when the strategy memoizes.
pub struct Resolution {
    /// The produced value.
    pub value: Value,
    /// The entry to install over the resolved one, when memoizing.
    pub replacement: Option<Resolver>,
}

impl Resolver {
    /// Produces a value for `key` according to the stored strategy.
    ///
    /// Memoizing strategies do not mutate anything here; they request it
    /// through the returned replacement, which the container installs
    /// over the resolved entry.
    pub fn resolve(&self, key: &str, args: &[Value]) -> Result<Resolution, BilboError> {
        match self.kind {
            StorageKind::Stuff => Ok(Resolution {
                value: self.producer.as_value(),
                replacement: None,
            }),
            StorageKind::Prototype => {
                let value = self.derive(key)?;
                Ok(Resolution {
                    value,
                    replacement: None,
                })
            }
            StorageKind::Factory | StorageKind::Type => {
                let value = self.invoke(key, args)?;
                Ok(Resolution {
                    value,
                    replacement: None,
                })
            }
            StorageKind::Lazy | StorageKind::Singleton => {
                let value = self.invoke(key, args)?;
                Ok(Resolution {
                    value: Arc::clone(&value),
                    replacement: Some(Resolver {
                        kind: StorageKind::Stuff,
                        producer: Producer::Value(value),
                    }),
                })
            }
        }
    }

    fn derive(&self, key: &str) -> Result<Value, BilboError> {
        match &self.producer {
            Producer::Object(template) => {
                let derived: Value = Object::with_parent(Arc::clone(template));
                Ok(derived)
            }
            _ => Err(BilboError::Resolution {
                code: "BILBO_RESOLUTION_NOT_A_TEMPLATE".to_string(),
                message: format!(
                    "'{}' is stored as a prototype but its producer is not an object",
                    key
                ),
            }),
        }
    }

    fn invoke(&self, key: &str, args: &[Value]) -> Result<Value, BilboError> {
        match &self.producer {
            Producer::Function(callable) => Ok(callable.invoke(args)),
            Producer::Constructor(ctor) => Ok(ctor.construct(args)),
            _ => Err(BilboError::Resolution {
                code: "BILBO_RESOLUTION_NOT_CALLABLE".to_string(),
                message: format!(
                    "'{}' is stored as {} but its producer cannot be invoked",
                    key, self.kind
                ),
            }),
        }
    }
}
