//! Climate entity for GE Home air conditioners.
//!
//! [`Climate`] presents an appliance's ERD registers as a climate device:
//! an HVAC mode, the list of modes on offer, and a target temperature.
//! It holds no state of its own, every read goes to the appliance.

use gehome_protocol::erd::{self, ErdCode, IsErd, ValueType};
use gehome_protocol::ErdValue;
use thiserror::Error;

pub mod appliance;
pub mod mode;

pub use appliance::{Appliance, MemoryAppliance};
pub use mode::{build_hvac_modes, ClimateMode, ModeTable};

pub struct Climate<A> {
    appliance: A,
    table: &'static ModeTable,
}

#[derive(Error, Debug)]
pub enum Error<E> {
    #[error("unsupported hvac mode: {0}")]
    UnsupportedMode(ClimateMode),
    #[error(transparent)]
    Appliance(E),
}

impl<A: Appliance> Climate<A> {
    pub fn new(appliance: A) -> Self {
        Self::with_table(appliance, &ModeTable::AIR_CONDITIONER)
    }

    pub fn with_table(appliance: A, table: &'static ModeTable) -> Self {
        Climate { appliance, table }
    }

    /// Current HVAC mode. Falls back to [`ClimateMode::Auto`] when the
    /// appliance hasn't reported a mode we know how to translate.
    pub fn hvac_mode(&self) -> ClimateMode {
        let Some(ac_mode) = self.read::<erd::OperationMode>() else {
            log::debug!("no operation mode reported, assuming {}", ClimateMode::Auto);
            return ClimateMode::Auto;
        };

        self.table.climate_mode(ac_mode).unwrap_or_else(|| {
            log::debug!("no climate mode for operation mode {ac_mode}, assuming {}", ClimateMode::Auto);
            ClimateMode::Auto
        })
    }

    pub fn hvac_modes(&self) -> Vec<ClimateMode> {
        let available = self.read::<erd::AvailableModes>();
        build_hvac_modes(available.as_ref())
    }

    /// Register holding the setpoint for the current mode. Heating has a
    /// setpoint of its own.
    pub fn target_temperature_code(&self) -> ErdCode {
        match self.hvac_mode() {
            ClimateMode::Heat => erd::TargetHeatingTemperature::CODE,
            _ => erd::TargetTemperature::CODE,
        }
    }

    pub fn target_temperature(&self) -> Option<f32> {
        let code = self.target_temperature_code();
        self.appliance.get(code).and_then(|value| f32::from_value(&value))
    }

    pub fn current_temperature(&self) -> Option<f32> {
        self.read::<erd::AmbientTemperature>()
    }

    pub async fn set_hvac_mode(&self, mode: ClimateMode) -> Result<(), Error<A::Error>> {
        let ac_mode = self.table.ac_mode(mode)
            .ok_or(Error::UnsupportedMode(mode))?;

        self.write(erd::OperationMode::CODE, ac_mode.into()).await
    }

    /// Writes `temperature` to the setpoint of the mode the appliance is
    /// in at the time of the call. A concurrent mode change may land the
    /// write in the other setpoint.
    pub async fn set_temperature(&self, temperature: f32) -> Result<(), Error<A::Error>> {
        let code = self.target_temperature_code();
        self.write(code, temperature.into()).await
    }

    fn read<E: IsErd>(&self) -> Option<E::Value> {
        self.appliance.get(E::CODE).and_then(|value| E::get(&value))
    }

    async fn write(&self, code: ErdCode, value: ErdValue) -> Result<(), Error<A::Error>> {
        log::debug!("setting erd {code} to {value}");
        self.appliance.set(code, value).await.map_err(Error::Appliance)
    }
}
