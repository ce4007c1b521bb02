//! Unit conversions for optical and physical quantities.
//!
//! All functions are pure and elementwise: they accept anything implementing
//! [`Elementwise`] (a bare `f64`, `[f64; N]`, `Vec<f64>`, `&[f64]`, ...) and
//! return a freshly allocated value of the same shape.
//!
//! # Domain guard
//!
//! Conversions whose domain is strictly positive values (the logarithmic power
//! and ratio conversions, and the frequency/wavelength reciprocals) take an
//! [`ErrorMode`] that decides what happens to an element `<= 0`:
//!
//! - [`ErrorMode::Raise`]: the call fails with [`MatheError::Domain`], naming the
//!   function, the offending value and its position. No partial result.
//! - [`ErrorMode::Warn`]: a `warn` event is emitted for the element and a
//!   placeholder is written in its slot; the remaining elements are converted.
//! - [`ErrorMode::Ignore`]: same placeholder, silently.
//!
//! The placeholder is `-inf` for logarithmic conversions. The reciprocal
//! conversions keep the raw IEEE quotient (`+inf` for zero, a negative number
//! for negative input). NaN is not `<= 0` and propagates as NaN.
//!
//! # Example
//!
//! ```
//! use mathe_core::converters::{watt2dbm, dbm2watt, ErrorMode};
//!
//! let dbm = watt2dbm(0.001, ErrorMode::Raise)?;
//! assert_eq!(dbm, 0.0);
//!
//! let readings = watt2dbm(vec![1e-3, 0.0, 1.0], ErrorMode::Ignore)?;
//! assert_eq!(readings[1], f64::NEG_INFINITY);
//!
//! let watts = dbm2watt([0.0, 30.0]);
//! assert!((watts[1] - 1.0).abs() < 1e-12);
//! # Ok::<(), mathe_core::error::MatheError>(())
//! ```

mod elementwise;
mod mode;

pub use elementwise::Elementwise;
pub use mode::ErrorMode;

use crate::constants::{
    DBM_PER_DBW_OFFSET, HZ_PER_GHZ, METERS_PER_NANOMETER, NANOMETERS_PER_METER, SPEED_OF_LIGHT,
};
use crate::error::{MatheError, MatheResult};
use tracing::warn;

/// Value written in place of an element outside the domain.
#[derive(Debug, Clone, Copy)]
enum Placeholder {
    NegInfinity,
    /// Keep whatever the formula yields for the element.
    Evaluated,
}

/// Applies `op` elementwise after checking that every element is `> 0`.
fn convert_positive<V, F>(
    function: &'static str,
    value: V,
    mode: ErrorMode,
    placeholder: Placeholder,
    op: F,
) -> MatheResult<V::Output>
where
    V: Elementwise,
    F: Fn(f64) -> f64,
{
    value.try_map_indexed(|index, x| {
        if x > 0.0 || x.is_nan() {
            return Ok(op(x));
        }

        let replacement = match placeholder {
            Placeholder::NegInfinity => f64::NEG_INFINITY,
            Placeholder::Evaluated => op(x),
        };

        match mode {
            ErrorMode::Raise => Err(MatheError::Domain {
                function,
                index,
                value: x,
            }),
            ErrorMode::Warn => {
                warn!(
                    function,
                    index = ?index,
                    value = x,
                    replacement,
                    "Invalid input in '{}': values must be strictly positive (> 0)",
                    function
                );
                Ok(replacement)
            }
            ErrorMode::Ignore => Ok(replacement),
        }
    })
}

// ==========================================
// Dimensionless ratios (gain, SNR)
// ==========================================

/// Linear ratio to decibels: `10 * log10(x)`.
///
/// Useful for gain, OSNR and GSNR. Elements `<= 0` are handled according to `mode`
/// and become `-inf` when they are not raised.
pub fn lin2db<V: Elementwise>(value: V, mode: ErrorMode) -> MatheResult<V::Output> {
    decibels("lin2db", value, mode)
}

/// `10 * log10(x)` guarded under `function`'s name.
fn decibels<V: Elementwise>(
    function: &'static str,
    value: V,
    mode: ErrorMode,
) -> MatheResult<V::Output> {
    convert_positive(function, value, mode, Placeholder::NegInfinity, |x| {
        10.0 * x.log10()
    })
}

/// Decibels to linear ratio: `10^(x / 10)`. Defined for every input.
#[must_use]
pub fn db2lin<V: Elementwise>(value_db: V) -> V::Output {
    value_db.map_values(|x| 10f64.powf(x / 10.0))
}

// ==========================================
// Power (W, dBm, dBW)
// ==========================================

/// Watts to dBm: `10 * log10(P) + 30`.
pub fn watt2dbm<V: Elementwise>(power_watt: V, mode: ErrorMode) -> MatheResult<V::Output> {
    convert_positive("watt2dbm", power_watt, mode, Placeholder::NegInfinity, |x| {
        10.0 * x.log10() + DBM_PER_DBW_OFFSET
    })
}

/// dBm to watts: `10^((P - 30) / 10)`.
#[must_use]
pub fn dbm2watt<V: Elementwise>(power_dbm: V) -> V::Output {
    power_dbm.map_values(|x| 10f64.powf((x - DBM_PER_DBW_OFFSET) / 10.0))
}

/// Watts to dBW. Alias of [`lin2db`]; errors and warnings name `watt2db`.
pub fn watt2db<V: Elementwise>(power_watt: V, mode: ErrorMode) -> MatheResult<V::Output> {
    decibels("watt2db", power_watt, mode)
}

/// dBW to watts. Alias of [`db2lin`].
#[must_use]
pub fn db2watt<V: Elementwise>(value_db: V) -> V::Output {
    db2lin(value_db)
}

// ==========================================
// Frequency and wavelength
// ==========================================

/// Frequency in Hz to vacuum wavelength in meters: `c / f`.
pub fn freq_hz_to_wavelength_m<V: Elementwise>(
    freq_hz: V,
    mode: ErrorMode,
) -> MatheResult<V::Output> {
    convert_positive(
        "freq_hz_to_wavelength_m",
        freq_hz,
        mode,
        Placeholder::Evaluated,
        |f| SPEED_OF_LIGHT / f,
    )
}

/// Vacuum wavelength in meters to frequency in Hz: `c / λ`.
pub fn wavelength_m_to_freq_hz<V: Elementwise>(
    wavelength_m: V,
    mode: ErrorMode,
) -> MatheResult<V::Output> {
    convert_positive(
        "wavelength_m_to_freq_hz",
        wavelength_m,
        mode,
        Placeholder::Evaluated,
        |wl| SPEED_OF_LIGHT / wl,
    )
}

/// Vacuum wavelength in nanometers to frequency in Hz: `c / (λ * 1e-9)`.
///
/// ```
/// use mathe_core::converters::{wavelength_nm_to_freq_hz, ErrorMode};
///
/// // C-band edge
/// let f = wavelength_nm_to_freq_hz(1530.0, ErrorMode::Raise)?;
/// assert!((f - 1.959e14).abs() / 1.959e14 < 1e-3);
/// # Ok::<(), mathe_core::error::MatheError>(())
/// ```
pub fn wavelength_nm_to_freq_hz<V: Elementwise>(
    wavelength_nm: V,
    mode: ErrorMode,
) -> MatheResult<V::Output> {
    convert_positive(
        "wavelength_nm_to_freq_hz",
        wavelength_nm,
        mode,
        Placeholder::Evaluated,
        |wl| SPEED_OF_LIGHT / (wl * METERS_PER_NANOMETER),
    )
}

/// Frequency in Hz to vacuum wavelength in nanometers: `(c / f) * 1e9`.
pub fn freq_hz_to_wavelength_nm<V: Elementwise>(
    freq_hz: V,
    mode: ErrorMode,
) -> MatheResult<V::Output> {
    convert_positive(
        "freq_hz_to_wavelength_nm",
        freq_hz,
        mode,
        Placeholder::Evaluated,
        |f| (SPEED_OF_LIGHT / f) * NANOMETERS_PER_METER,
    )
}

/// GHz to Hz.
#[must_use]
pub fn freq_ghz_to_hz<V: Elementwise>(freq_ghz: V) -> V::Output {
    freq_ghz.map_values(|f| f * HZ_PER_GHZ)
}

/// Hz to GHz.
#[must_use]
pub fn freq_hz_to_ghz<V: Elementwise>(freq_hz: V) -> V::Output {
    freq_hz.map_values(|f| f / HZ_PER_GHZ)
}
