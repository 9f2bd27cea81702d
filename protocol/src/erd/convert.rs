use core::fmt::Display;
use core::marker::PhantomData;

use thiserror::Error;

use super::ErdCode;
use super::types::EnumOutOfRange;
use crate::value::{ErdValue, RawValue};

pub struct TypedErd<const N: u16, T>(PhantomData<T>);

impl<const N: u16, T: ValueType> IsErd for TypedErd<N, T> {
    type Value = T;
    const CODE: ErdCode = ErdCode(N);

    fn get(value: &ErdValue) -> Option<T> {
        let typed = T::from_value(value);
        if typed.is_none() {
            log::debug!("erd {} holds unexpected value {value}", Self::CODE);
        }
        typed
    }

    fn decode(raw: &RawValue) -> Result<T, DecodeError> {
        T::decode(raw)
    }

    fn encode(value: &ErdValue) -> Result<RawValue, EncodeError> {
        match T::from_value(value) {
            Some(typed) => typed.encode(),
            None => Err(EncodeError::WrongKind { code: Self::CODE, value: *value }),
        }
    }
}

/// A register whose value type is known statically.
pub trait IsErd {
    type Value: ValueType;
    const CODE: ErdCode;
    fn get(value: &ErdValue) -> Option<Self::Value>;
    fn decode(raw: &RawValue) -> Result<Self::Value, DecodeError>;
    fn encode(value: &ErdValue) -> Result<RawValue, EncodeError>;
}

pub trait ValueType: Sized + Copy {
    type Repr: ValueRepr;

    fn try_from_repr(repr: Self::Repr) -> Result<Self, DecodeError>;
    fn try_to_repr(&self) -> Result<Self::Repr, EncodeError>;

    fn from_value(value: &ErdValue) -> Option<Self>;
    fn into_value(self) -> ErdValue;

    fn decode(raw: &RawValue) -> Result<Self, DecodeError> {
        let repr = Self::Repr::try_from_bytes(raw.as_bytes())?;
        Self::try_from_repr(repr)
    }

    fn encode(&self) -> Result<RawValue, EncodeError> {
        let repr = self.try_to_repr()?;
        Ok(RawValue::new(repr.to_bytes()))
    }
}

pub trait ValueRepr: Display + Sized + Copy {
    fn try_from_bytes(bytes: &[u8]) -> Result<Self, DecodeError>;
    fn to_bytes(&self) -> Vec<u8>;
}

impl ValueRepr for u8 {
    fn try_from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes {
            [byte] => Ok(*byte),
            _ => Err(DecodeError::WrongLength { expected: 1, actual: bytes.len() }),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![*self]
    }
}

impl ValueRepr for u16 {
    fn try_from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        match bytes {
            [hi, lo] => Ok(u16::from_be_bytes([*hi, *lo])),
            _ => Err(DecodeError::WrongLength { expected: 2, actual: bytes.len() }),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

// temperatures are whole degrees on the wire, in whatever unit the
// appliance is configured for
impl ValueType for f32 {
    type Repr = u8;

    fn try_from_repr(repr: u8) -> Result<Self, DecodeError> {
        Ok(f32::from(repr))
    }

    fn try_to_repr(&self) -> Result<u8, EncodeError> {
        let rounded = self.round();
        if rounded.is_finite() && (0.0..=f32::from(u8::MAX)).contains(&rounded) {
            Ok(rounded as u8)
        } else {
            Err(EncodeError::Temperature(*self))
        }
    }

    fn from_value(value: &ErdValue) -> Option<Self> {
        match value {
            ErdValue::Temperature(temp) => Some(*temp),
            _ => None,
        }
    }

    fn into_value(self) -> ErdValue {
        ErdValue::Temperature(self)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error(transparent)]
    OutOfRange(#[from] EnumOutOfRange),
    #[error("no known value type for erd {0}")]
    UnknownCode(ErdCode),
}

#[derive(Error, Debug, PartialEq)]
pub enum EncodeError {
    #[error("temperature {0} does not fit in a single byte")]
    Temperature(f32),
    #[error("value {value} does not belong in erd {code}")]
    WrongKind { code: ErdCode, value: ErdValue },
    #[error("no known value type for erd {0}")]
    UnknownCode(ErdCode),
}
