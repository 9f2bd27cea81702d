//! End-to-end behaviour of the climate entity against an in-memory
//! appliance.

use gehome_climate::{Climate, ClimateMode, MemoryAppliance};
use gehome_protocol::erd::types::{AcAvailableModes, AcOperationMode};
use gehome_protocol::{ErdCode, ErdValue};

fn cooling_appliance() -> MemoryAppliance {
    MemoryAppliance::from_values([
        (ErdCode::AC_OPERATION_MODE, ErdValue::OperationMode(AcOperationMode::Cool)),
        (ErdCode::AC_AVAILABLE_MODES, ErdValue::AvailableModes(AcAvailableModes {
            has_cool: true,
            has_fan: true,
            ..Default::default()
        })),
    ])
}

#[tokio::test]
async fn switching_to_heat_routes_setpoint_to_heating_register() {
    let appliance = cooling_appliance();
    let climate = Climate::new(&appliance);

    assert_eq!(climate.hvac_mode(), ClimateMode::Cool);
    assert_eq!(climate.hvac_modes(), vec![ClimateMode::Cool, ClimateMode::FanOnly]);

    climate.set_hvac_mode(ClimateMode::Heat).await.unwrap();
    climate.set_temperature(21.0).await.unwrap();

    assert_eq!(appliance.writes(), vec![
        (ErdCode::AC_OPERATION_MODE, ErdValue::OperationMode(AcOperationMode::Heat)),
        (ErdCode::AC_TARGET_HEATING_TEMPERATURE, ErdValue::Temperature(21.0)),
    ]);
    assert_eq!(climate.hvac_mode(), ClimateMode::Heat);
    assert_eq!(climate.target_temperature(), Some(21.0));
}

#[tokio::test]
async fn leaving_heat_routes_setpoint_back_to_standard_register() {
    let appliance = cooling_appliance();
    let climate = Climate::new(&appliance);

    climate.set_hvac_mode(ClimateMode::Heat).await.unwrap();
    climate.set_hvac_mode(ClimateMode::FanOnly).await.unwrap();
    climate.set_temperature(24.0).await.unwrap();

    assert_eq!(appliance.writes(), vec![
        (ErdCode::AC_OPERATION_MODE, ErdValue::OperationMode(AcOperationMode::Heat)),
        (ErdCode::AC_OPERATION_MODE, ErdValue::OperationMode(AcOperationMode::FanOnly)),
        (ErdCode::AC_TARGET_TEMPERATURE, ErdValue::Temperature(24.0)),
    ]);
}

#[tokio::test]
async fn reads_reflect_changes_made_behind_the_entity() {
    let appliance = cooling_appliance();
    let climate = Climate::new(&appliance);

    appliance.insert(ErdCode::AC_OPERATION_MODE, ErdValue::OperationMode(AcOperationMode::Heat));
    climate.set_temperature(19.0).await.unwrap();

    assert_eq!(appliance.writes(), vec![
        (ErdCode::AC_TARGET_HEATING_TEMPERATURE, ErdValue::Temperature(19.0)),
    ]);
}
