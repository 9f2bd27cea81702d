use core::str::FromStr;

use derive_more::{Display, From};
use thiserror::Error;

use crate::erd::types::{AcAvailableModes, AcOperationMode};

/// Decoded value of a register.
#[derive(Debug, Display, From, Clone, Copy, PartialEq)]
pub enum ErdValue {
    #[display("{_0}")]
    OperationMode(AcOperationMode),
    #[display("{_0}")]
    AvailableModes(AcAvailableModes),
    #[display("{_0}")]
    Temperature(f32),
}

/// Register bytes as they travel to and from the appliance, written as
/// a hex string.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{}", hex::encode(&self.0))]
pub struct RawValue(Vec<u8>);

#[derive(Error, Debug, PartialEq)]
#[error("invalid hex value {input:?}: {reason}")]
pub struct InvalidHex {
    input: String,
    reason: hex::FromHexError,
}

impl RawValue {
    pub fn new(bytes: Vec<u8>) -> Self {
        RawValue(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for RawValue {
    type Err = InvalidHex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        hex::decode(digits)
            .map(RawValue)
            .map_err(|reason| InvalidHex { input: s.to_owned(), reason })
    }
}
