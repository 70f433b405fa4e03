//! Platform error types

use core::fmt;

/// ADC conversion errors
///
/// Platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum AdcError {
    /// The conversion did not complete or returned invalid data
    ConversionFailed,
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdcError::ConversionFailed => write!(f, "ADC conversion failed"),
        }
    }
}
