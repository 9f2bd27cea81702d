use derive_more::Display;
use thiserror::Error;

use super::convert::{DecodeError, EncodeError, ValueType};
use crate::value::ErdValue;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("enum value out of range: {enum_name}: {value:#04x}")]
pub struct EnumOutOfRange {
    pub enum_name: &'static str,
    pub value: u8,
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcOperationMode {
    #[display("cool")]
    Cool = 0x00,
    #[display("fan_only")]
    FanOnly = 0x01,
    #[display("energy_saver")]
    EnergySaver = 0x02,
    #[display("heat")]
    Heat = 0x03,
    #[display("dry")]
    Dry = 0x04,
    #[display("auto")]
    Auto = 0x05,
}

impl AcOperationMode {
    pub const ALL: [AcOperationMode; 6] = [
        AcOperationMode::Cool,
        AcOperationMode::FanOnly,
        AcOperationMode::EnergySaver,
        AcOperationMode::Heat,
        AcOperationMode::Dry,
        AcOperationMode::Auto,
    ];
}

impl ValueType for AcOperationMode {
    type Repr = u8;

    fn try_from_repr(repr: u8) -> Result<Self, DecodeError> {
        match repr {
            0x00 => Ok(AcOperationMode::Cool),
            0x01 => Ok(AcOperationMode::FanOnly),
            0x02 => Ok(AcOperationMode::EnergySaver),
            0x03 => Ok(AcOperationMode::Heat),
            0x04 => Ok(AcOperationMode::Dry),
            0x05 => Ok(AcOperationMode::Auto),
            _ => Err(EnumOutOfRange { enum_name: "AcOperationMode", value: repr }.into()),
        }
    }

    fn try_to_repr(&self) -> Result<u8, EncodeError> {
        Ok(*self as u8)
    }

    fn from_value(value: &ErdValue) -> Option<Self> {
        match value {
            ErdValue::OperationMode(mode) => Some(*mode),
            _ => None,
        }
    }

    fn into_value(self) -> ErdValue {
        ErdValue::OperationMode(self)
    }
}

/// Operation modes the appliance reports it is capable of.
///
/// `raw_value` is the register value the flags were decoded from. Bits
/// with no corresponding flag are preserved when encoding.
#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{raw_value:#06x}")]
pub struct AcAvailableModes {
    pub has_heat: bool,
    pub has_dry: bool,
    pub has_eco: bool,
    pub has_turbo_cool: bool,
    pub has_silent: bool,
    pub has_auto: bool,
    pub has_cool: bool,
    pub has_fan: bool,
    pub raw_value: u16,
}

impl AcAvailableModes {
    pub const HEAT: u16 = 0x0001;
    pub const DRY: u16 = 0x0002;
    pub const ECO: u16 = 0x0004;
    pub const TURBO_COOL: u16 = 0x0008;
    pub const SILENT: u16 = 0x0010;
    pub const AUTO: u16 = 0x0020;
    pub const COOL: u16 = 0x0100;
    pub const FAN: u16 = 0x0200;

    const KNOWN: u16 = Self::HEAT | Self::DRY | Self::ECO | Self::TURBO_COOL
        | Self::SILENT | Self::AUTO | Self::COOL | Self::FAN;

    pub fn from_raw(raw: u16) -> Self {
        AcAvailableModes {
            has_heat: raw & Self::HEAT != 0,
            has_dry: raw & Self::DRY != 0,
            has_eco: raw & Self::ECO != 0,
            has_turbo_cool: raw & Self::TURBO_COOL != 0,
            has_silent: raw & Self::SILENT != 0,
            has_auto: raw & Self::AUTO != 0,
            has_cool: raw & Self::COOL != 0,
            has_fan: raw & Self::FAN != 0,
            raw_value: raw,
        }
    }

    pub fn to_raw(&self) -> u16 {
        let flags = [
            (self.has_heat, Self::HEAT),
            (self.has_dry, Self::DRY),
            (self.has_eco, Self::ECO),
            (self.has_turbo_cool, Self::TURBO_COOL),
            (self.has_silent, Self::SILENT),
            (self.has_auto, Self::AUTO),
            (self.has_cool, Self::COOL),
            (self.has_fan, Self::FAN),
        ];

        flags.iter()
            .filter(|(set, _)| *set)
            .fold(self.raw_value & !Self::KNOWN, |raw, (_, bit)| raw | bit)
    }
}

impl ValueType for AcAvailableModes {
    type Repr = u16;

    fn try_from_repr(repr: u16) -> Result<Self, DecodeError> {
        Ok(AcAvailableModes::from_raw(repr))
    }

    fn try_to_repr(&self) -> Result<u16, EncodeError> {
        Ok(self.to_raw())
    }

    fn from_value(value: &ErdValue) -> Option<Self> {
        match value {
            ErdValue::AvailableModes(modes) => Some(*modes),
            _ => None,
        }
    }

    fn into_value(self) -> ErdValue {
        ErdValue::AvailableModes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_mode_repr_matches_vendor_codes() {
        for mode in AcOperationMode::ALL {
            let repr = mode.try_to_repr().unwrap();
            assert_eq!(AcOperationMode::try_from_repr(repr), Ok(mode));
        }
        assert_eq!(AcOperationMode::Heat.try_to_repr(), Ok(0x03));
        assert_eq!(AcOperationMode::EnergySaver.try_to_repr(), Ok(0x02));
    }

    #[test]
    fn operation_mode_out_of_range() {
        let err = AcOperationMode::try_from_repr(0xff).unwrap_err();
        assert_eq!(err.to_string(), "enum value out of range: AcOperationMode: 0xff");
    }

    #[test]
    fn available_modes_keeps_unknown_bits() {
        let mut modes = AcAvailableModes::from_raw(0x8000 | AcAvailableModes::COOL);
        assert!(modes.has_cool);
        assert!(!modes.has_heat);

        modes.has_heat = true;
        modes.has_cool = false;
        assert_eq!(modes.to_raw(), 0x8000 | AcAvailableModes::HEAT);
    }

    #[test]
    fn available_modes_from_flags() {
        let modes = AcAvailableModes {
            has_cool: true,
            has_fan: true,
            ..Default::default()
        };
        assert_eq!(modes.to_raw(), 0x0300);
    }
}
