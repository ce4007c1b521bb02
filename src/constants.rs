//! Physical constants and unit scale factors used by the converters.

/// Speed of light in vacuum in m/s (exact by SI definition).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Meters in one nanometer.
pub const METERS_PER_NANOMETER: f64 = 1e-9;

/// Nanometers in one meter.
pub const NANOMETERS_PER_METER: f64 = 1e9;

/// Hertz in one gigahertz.
pub const HZ_PER_GHZ: f64 = 1e9;

/// Offset between dBm and dBW (1 W = 1000 mW = +30 dB).
pub const DBM_PER_DBW_OFFSET: f64 = 30.0;
