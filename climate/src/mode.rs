use std::str::FromStr;

use gehome_protocol::erd::types::{AcAvailableModes, AcOperationMode};
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid value for {0}: {1}")]
pub struct InvalidEnumString(&'static str, String);

/// Operating mode as presented to the home automation platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ClimateMode {
    Auto,
    Cool,
    Dry,
    FanOnly,
    Heat,
}

impl FromStr for ClimateMode {
    type Err = InvalidEnumString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ClimateMode::Auto),
            "cool" => Ok(ClimateMode::Cool),
            "dry" => Ok(ClimateMode::Dry),
            "fan_only" => Ok(ClimateMode::FanOnly),
            "heat" => Ok(ClimateMode::Heat),
            _ => Err(InvalidEnumString("ClimateMode", s.to_string())),
        }
    }
}

/// Modes offered when the appliance doesn't report its capabilities.
pub const FALLBACK_MODES: [ClimateMode; 2] = [ClimateMode::Cool, ClimateMode::FanOnly];

/// Translation between the appliance's operation modes and climate modes.
///
/// Reading goes through `from_ac`, which may map several vendor modes onto
/// one climate mode. Writing goes through `to_ac`, which must map each
/// climate mode back onto a vendor mode that reads as the same climate mode.
pub struct ModeTable {
    pub from_ac: &'static [(AcOperationMode, ClimateMode)],
    pub to_ac: &'static [(ClimateMode, AcOperationMode)],
}

impl ModeTable {
    pub const AIR_CONDITIONER: ModeTable = ModeTable {
        from_ac: &[
            (AcOperationMode::Auto, ClimateMode::Auto),
            (AcOperationMode::Cool, ClimateMode::Cool),
            (AcOperationMode::Dry, ClimateMode::Dry),
            (AcOperationMode::EnergySaver, ClimateMode::Cool),
            (AcOperationMode::FanOnly, ClimateMode::FanOnly),
            (AcOperationMode::Heat, ClimateMode::Heat),
        ],
        to_ac: &[
            (ClimateMode::Auto, AcOperationMode::Auto),
            (ClimateMode::Cool, AcOperationMode::Cool),
            (ClimateMode::Dry, AcOperationMode::Dry),
            (ClimateMode::FanOnly, AcOperationMode::FanOnly),
            (ClimateMode::Heat, AcOperationMode::Heat),
        ],
    };

    pub fn climate_mode(&self, mode: AcOperationMode) -> Option<ClimateMode> {
        self.from_ac.iter()
            .find(|(ac, _)| *ac == mode)
            .map(|(_, climate)| *climate)
    }

    pub fn ac_mode(&self, mode: ClimateMode) -> Option<AcOperationMode> {
        self.to_ac.iter()
            .find(|(climate, _)| *climate == mode)
            .map(|(_, ac)| *ac)
    }

    /// Checks that every climate mode can be written, and that writing it
    /// reads back as the same climate mode.
    pub fn check(&self) -> Result<(), TableError> {
        for mode in ClimateMode::iter() {
            let ac = self.ac_mode(mode).ok_or(TableError::Unwritable(mode))?;

            match self.climate_mode(ac) {
                Some(read) if read == mode => {}
                read => { return Err(TableError::NoRoundTrip { mode, ac, read }); }
            }
        }

        Ok(())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("no operation mode for climate mode {0}")]
    Unwritable(ClimateMode),
    #[error("climate mode {mode} writes {ac}, which reads back as {read:?}")]
    NoRoundTrip {
        mode: ClimateMode,
        ac: AcOperationMode,
        read: Option<ClimateMode>,
    },
}

/// Builds the list of climate modes to offer from the appliance's
/// reported capabilities. Order is significant.
pub fn build_hvac_modes(available: Option<&AcAvailableModes>) -> Vec<ClimateMode> {
    let Some(available) = available else {
        return FALLBACK_MODES.to_vec();
    };

    [
        (available.has_auto, ClimateMode::Auto),
        (available.has_cool, ClimateMode::Cool),
        (available.has_dry, ClimateMode::Dry),
        (available.has_fan, ClimateMode::FanOnly),
        (available.has_heat, ClimateMode::Heat),
    ]
    .into_iter()
    .filter_map(|(has, mode)| has.then_some(mode))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available(raw: u16) -> AcAvailableModes {
        AcAvailableModes::from_raw(raw)
    }

    #[test]
    fn air_conditioner_table_round_trips() {
        assert_eq!(ModeTable::AIR_CONDITIONER.check(), Ok(()));
    }

    #[test]
    fn every_operation_mode_reads_as_a_climate_mode() {
        let table = ModeTable::AIR_CONDITIONER;
        let expected = [
            (AcOperationMode::Auto, ClimateMode::Auto),
            (AcOperationMode::Cool, ClimateMode::Cool),
            (AcOperationMode::Dry, ClimateMode::Dry),
            (AcOperationMode::EnergySaver, ClimateMode::Cool),
            (AcOperationMode::FanOnly, ClimateMode::FanOnly),
            (AcOperationMode::Heat, ClimateMode::Heat),
        ];

        for (ac, climate) in expected {
            assert_eq!(table.climate_mode(ac), Some(climate), "{ac}");
        }
    }

    #[test]
    fn heat_maps_both_ways() {
        let table = ModeTable::AIR_CONDITIONER;
        assert_eq!(table.climate_mode(AcOperationMode::Heat), Some(ClimateMode::Heat));
        assert_eq!(table.ac_mode(ClimateMode::Heat), Some(AcOperationMode::Heat));
    }

    #[test]
    fn cool_never_writes_energy_saver() {
        let table = ModeTable::AIR_CONDITIONER;
        assert_eq!(table.ac_mode(ClimateMode::Cool), Some(AcOperationMode::Cool));
    }

    #[test]
    fn check_reports_missing_and_inconsistent_entries() {
        let missing = ModeTable {
            from_ac: ModeTable::AIR_CONDITIONER.from_ac,
            to_ac: &[(ClimateMode::Auto, AcOperationMode::Auto)],
        };
        assert_eq!(missing.check(), Err(TableError::Unwritable(ClimateMode::Cool)));

        let crossed = ModeTable {
            from_ac: &[(AcOperationMode::EnergySaver, ClimateMode::Cool)],
            to_ac: &[(ClimateMode::Auto, AcOperationMode::EnergySaver)],
        };
        assert_eq!(crossed.check(), Err(TableError::NoRoundTrip {
            mode: ClimateMode::Auto,
            ac: AcOperationMode::EnergySaver,
            read: Some(ClimateMode::Cool),
        }));
    }

    #[test]
    fn modes_follow_capabilities_in_fixed_order() {
        let all = available(0xffff);
        assert_eq!(build_hvac_modes(Some(&all)), vec![
            ClimateMode::Auto,
            ClimateMode::Cool,
            ClimateMode::Dry,
            ClimateMode::FanOnly,
            ClimateMode::Heat,
        ]);
    }

    #[test]
    fn heat_included_when_available() {
        let modes = available(AcAvailableModes::HEAT | AcAvailableModes::COOL | AcAvailableModes::FAN);
        assert_eq!(build_hvac_modes(Some(&modes)), vec![
            ClimateMode::Cool,
            ClimateMode::FanOnly,
            ClimateMode::Heat,
        ]);
    }

    #[test]
    fn heat_excluded_when_unavailable() {
        let modes = available(AcAvailableModes::COOL | AcAvailableModes::FAN);
        let hvac_modes = build_hvac_modes(Some(&modes));
        assert_eq!(hvac_modes, vec![ClimateMode::Cool, ClimateMode::FanOnly]);
        assert!(!hvac_modes.contains(&ClimateMode::Heat));
    }

    #[test]
    fn irrelevant_capabilities_are_ignored() {
        let modes = available(AcAvailableModes::ECO | AcAvailableModes::TURBO_COOL | AcAvailableModes::SILENT);
        assert!(build_hvac_modes(Some(&modes)).is_empty());
    }

    #[test]
    fn unknown_capabilities_fall_back() {
        assert_eq!(build_hvac_modes(None), vec![ClimateMode::Cool, ClimateMode::FanOnly]);
    }

    #[test]
    fn mode_strings() {
        for mode in ClimateMode::iter() {
            assert_eq!(mode.to_string().parse::<ClimateMode>(), Ok(mode));
        }
        assert_eq!(ClimateMode::FanOnly.to_string(), "fan_only");
        assert_eq!(
            "off".parse::<ClimateMode>().unwrap_err().to_string(),
            "invalid value for ClimateMode: off"
        );
    }
}
