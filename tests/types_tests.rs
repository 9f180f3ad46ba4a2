//! Types Module Tests
//!
//! Tests for domain types (Voltage, RailLimits, RailCommand, JedecId)
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test types_tests

use s1_module::types::{JedecId, RailCommand, RailLimits, Voltage};
use s1_module::S1Error;

// =============================================================================
// Voltage Tests
// =============================================================================

#[test]
fn test_voltage_from_volts_rounds_to_millivolts() {
    assert_eq!(Voltage::from_volts(3.3).unwrap().as_millivolts(), 3300);
    assert_eq!(Voltage::from_volts(0.8).unwrap().as_millivolts(), 800);
    assert_eq!(Voltage::from_volts(1.2004).unwrap().as_millivolts(), 1200);
    assert_eq!(Voltage::from_volts(1.2006).unwrap().as_millivolts(), 1201);
}

#[test]
fn test_voltage_from_volts_invalid() {
    assert!(Voltage::from_volts(f32::NAN).is_none());
    assert!(Voltage::from_volts(-0.1).is_none());
    assert!(Voltage::from_volts(70.0).is_none());
    assert!(Voltage::from_volts(f32::INFINITY).is_none());
}

#[test]
fn test_voltage_as_volts() {
    let v = Voltage::from_millivolts(1800);
    assert!((v.as_volts() - 1.8).abs() < 1e-6);
}

#[test]
fn test_voltage_ordering() {
    assert!(Voltage::from_millivolts(3470) > Voltage::from_millivolts(3460));
    assert_eq!(Voltage::ZERO.as_millivolts(), 0);
}

// =============================================================================
// RailLimits Encoding Tests
// =============================================================================

#[test]
fn test_vio_encoding_3v0() {
    // (3000 - 800) / 25 = 88
    let code = RailLimits::VIO.encode(Voltage::from_millivolts(3000)).unwrap();
    assert_eq!(code, 0x58);
}

#[test]
fn test_encoding_at_range_minimum_is_zero() {
    assert_eq!(RailLimits::VIO.encode(Voltage::from_millivolts(800)).unwrap(), 0);
    assert_eq!(RailLimits::VAUX.encode(Voltage::from_millivolts(800)).unwrap(), 0);
}

#[test]
fn test_encoding_at_range_maximum() {
    // (3460 - 800) / 25 = 106.4 -> 106
    assert_eq!(RailLimits::VIO.encode(RailLimits::VIO.max).unwrap(), 106);
    // (5500 - 800) / 50 = 94
    assert_eq!(RailLimits::VAUX.encode(RailLimits::VAUX.max).unwrap(), 94);
}

#[test]
fn test_encoding_rounds_to_nearest_step() {
    // 1.212 V is 16.48 steps above 0.8 V
    assert_eq!(RailLimits::VIO.encode(Voltage::from_millivolts(1212)).unwrap(), 16);
    // 1.213 V is 16.52 steps
    assert_eq!(RailLimits::VIO.encode(Voltage::from_millivolts(1213)).unwrap(), 17);
}

#[test]
fn test_encoding_out_of_range_rejected() {
    assert_eq!(
        RailLimits::VIO.encode(Voltage::from_millivolts(3500)),
        Err(S1Error::InvalidSetting)
    );
    assert_eq!(
        RailLimits::VAUX.encode(Voltage::from_millivolts(700)),
        Err(S1Error::InvalidSetting)
    );
}

#[test]
fn test_decode() {
    assert_eq!(RailLimits::VIO.decode(0x58).as_millivolts(), 3000);
    assert_eq!(RailLimits::BUCK.decode(0x08).as_millivolts(), 1200);
}

#[test]
fn test_contains_is_inclusive() {
    assert!(RailLimits::VAUX.contains(RailLimits::VAUX.min));
    assert!(RailLimits::VAUX.contains(RailLimits::VAUX.max));
    assert!(!RailLimits::VAUX.contains(Voltage::from_millivolts(5501)));
}

// =============================================================================
// RailCommand Tests
// =============================================================================

#[test]
fn test_rail_command_zero_is_off() {
    assert_eq!(RailCommand::parse(0.0, &RailLimits::VAUX), Ok(RailCommand::Off));
    assert_eq!(RailCommand::parse(0.0, &RailLimits::VIO), Ok(RailCommand::Off));
}

#[test]
fn test_rail_command_in_range() {
    assert_eq!(
        RailCommand::parse(3.3, &RailLimits::VIO),
        Ok(RailCommand::On(Voltage::from_millivolts(3300)))
    );
}

#[test]
fn test_rail_command_bounds_inclusive() {
    assert!(RailCommand::parse(0.8, &RailLimits::VIO).is_ok());
    assert!(RailCommand::parse(3.46, &RailLimits::VIO).is_ok());
    assert!(RailCommand::parse(5.5, &RailLimits::VAUX).is_ok());
}

#[test]
fn test_rail_command_small_values_are_not_off() {
    assert_eq!(
        RailCommand::parse(0.001, &RailLimits::VAUX),
        Err(S1Error::InvalidSetting)
    );
    assert_eq!(
        RailCommand::parse(-0.5, &RailLimits::VAUX),
        Err(S1Error::InvalidSetting)
    );
}

#[test]
fn test_rail_command_rejects_nan_and_overrange() {
    assert_eq!(
        RailCommand::parse(f32::NAN, &RailLimits::VIO),
        Err(S1Error::InvalidSetting)
    );
    assert_eq!(
        RailCommand::parse(3.47, &RailLimits::VIO),
        Err(S1Error::InvalidSetting)
    );
    assert_eq!(
        RailCommand::parse(6.0, &RailLimits::VAUX),
        Err(S1Error::InvalidSetting)
    );
}

// =============================================================================
// JedecId Tests
// =============================================================================

#[test]
fn test_jedec_id_fields() {
    let id = JedecId::from_response([0xFF, 0xEF, 0x40, 0x16]);
    assert_eq!(id.manufacturer(), 0xEF);
    assert_eq!(id.memory_type(), 0x40);
    assert_eq!(id.capacity(), 0x16);
    assert_eq!(id.raw(), [0xFF, 0xEF, 0x40, 0x16]);
}
