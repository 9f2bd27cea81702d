use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use gehome_climate::appliance::MemoryError;
use gehome_climate::{Appliance, MemoryAppliance};
use gehome_protocol::erd::{self, EncodeError};
use gehome_protocol::{ErdCode, ErdValue, RawValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Appliance registers loaded from a TOML file of raw hex values.
///
/// Registers that don't decode are kept raw so that saving the snapshot
/// writes them back untouched.
pub struct Snapshot {
    appliance: MemoryAppliance,
    raw: RefCell<BTreeMap<String, String>>,
}

#[derive(Deserialize, Serialize, Default)]
struct SnapshotFile {
    #[serde(default)]
    erd: BTreeMap<String, String>,
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Appliance(#[from] MemoryError),
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        log::info!("reading appliance snapshot from: {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = toml::from_str(text)?;
        let appliance = MemoryAppliance::new();
        let mut raw = BTreeMap::new();

        for (key, hex) in file.erd {
            match decode_entry(&key, &hex) {
                Some((code, value)) => appliance.insert(code, value),
                None => { raw.insert(key, hex); }
            }
        }

        Ok(Snapshot { appliance, raw: RefCell::new(raw) })
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        log::info!("writing appliance snapshot to: {}", path.display());
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, SnapshotError> {
        let mut erd = self.raw.borrow().clone();

        for (code, value) in self.appliance.values() {
            // values were either decoded from the file or checked by `set`
            match erd::encode(code, &value) {
                Ok(raw) => { erd.insert(code.to_string(), raw.to_string()); }
                Err(err) => { log::warn!("dropping erd {code}: {err}"); }
            }
        }

        Ok(toml::to_string(&SnapshotFile { erd })?)
    }

    pub fn writes(&self) -> Vec<(ErdCode, ErdValue)> {
        self.appliance.writes()
    }
}

fn decode_entry(key: &str, hex: &str) -> Option<(ErdCode, ErdValue)> {
    let code = match key.parse::<ErdCode>() {
        Ok(code) => code,
        Err(err) => {
            log::warn!("{err}, keeping entry as is");
            return None;
        }
    };

    let raw = match hex.parse::<RawValue>() {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("erd {code}: {err}, keeping entry as is");
            return None;
        }
    };

    match erd::decode(code, &raw) {
        Ok(value) => Some((code, value)),
        Err(err) => {
            log::warn!("erd {code}: {err}, keeping entry as is");
            None
        }
    }
}

impl Appliance for Snapshot {
    type Error = WriteError;

    fn get(&self, code: ErdCode) -> Option<ErdValue> {
        self.appliance.get(code)
    }

    async fn set(&self, code: ErdCode, value: ErdValue) -> Result<(), WriteError> {
        // reject anything the file couldn't hold before touching state
        let raw = erd::encode(code, &value)?;
        self.appliance.set(code, value).await?;

        // a decoded value now supersedes any raw entry for the same code
        self.raw.borrow_mut().retain(|key, _| key.parse::<ErdCode>().ok() != Some(code));
        log::debug!("erd {code} is now {raw}");
        Ok(())
    }
}
