use std::cell::RefCell;
use std::collections::BTreeMap;

use gehome_protocol::{ErdCode, ErdValue};
use thiserror::Error;

/// Register access to a single appliance.
///
/// `get` returns the last known value of a register without touching the
/// appliance. `set` writes a register and resolves once the appliance
/// has accepted the value.
#[allow(async_fn_in_trait)]
pub trait Appliance {
    type Error: std::error::Error;

    fn get(&self, code: ErdCode) -> Option<ErdValue>;
    async fn set(&self, code: ErdCode, value: ErdValue) -> Result<(), Self::Error>;
}

impl<T: Appliance + ?Sized> Appliance for &T {
    type Error = T::Error;

    fn get(&self, code: ErdCode) -> Option<ErdValue> {
        (**self).get(code)
    }

    async fn set(&self, code: ErdCode, value: ErdValue) -> Result<(), Self::Error> {
        (**self).set(code, value).await
    }
}

/// Appliance state held in memory, recording every write.
#[derive(Default)]
pub struct MemoryAppliance {
    values: RefCell<BTreeMap<ErdCode, ErdValue>>,
    writes: RefCell<Vec<(ErdCode, ErdValue)>>,
    rejection: RefCell<Option<String>>,
}

#[derive(Error, Debug, PartialEq)]
pub enum MemoryError {
    #[error("write of {value} to erd {code} rejected: {reason}")]
    Rejected {
        code: ErdCode,
        value: ErdValue,
        reason: String,
    },
}

impl MemoryAppliance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = (ErdCode, ErdValue)>) -> Self {
        MemoryAppliance {
            values: RefCell::new(values.into_iter().collect()),
            ..Default::default()
        }
    }

    /// Sets a register without recording it as a write.
    pub fn insert(&self, code: ErdCode, value: ErdValue) {
        self.values.borrow_mut().insert(code, value);
    }

    /// All register values, ordered by code.
    pub fn values(&self) -> Vec<(ErdCode, ErdValue)> {
        self.values.borrow()
            .iter()
            .map(|(code, value)| (*code, *value))
            .collect()
    }

    /// Writes issued through `set`, oldest first.
    pub fn writes(&self) -> Vec<(ErdCode, ErdValue)> {
        self.writes.borrow().clone()
    }

    /// Makes every later write fail with `reason`.
    pub fn fail_writes(&self, reason: impl Into<String>) {
        *self.rejection.borrow_mut() = Some(reason.into());
    }
}

impl Appliance for MemoryAppliance {
    type Error = MemoryError;

    fn get(&self, code: ErdCode) -> Option<ErdValue> {
        self.values.borrow().get(&code).copied()
    }

    async fn set(&self, code: ErdCode, value: ErdValue) -> Result<(), MemoryError> {
        if let Some(reason) = self.rejection.borrow().clone() {
            return Err(MemoryError::Rejected { code, value, reason });
        }

        self.writes.borrow_mut().push((code, value));
        self.values.borrow_mut().insert(code, value);
        Ok(())
    }
}
