//! Mock ADC for host testing
//!
//! Replays a programmable sample pattern (cycling when the pattern is shorter
//! than the requested window) and can be configured to fail conversions.

use crate::platform::error::AdcError;
use crate::platform::traits::AdcSource;
use heapless::Vec;

/// Longest waveform pattern a mock can hold.
pub const MAX_PATTERN: usize = 64;

/// Mock single-channel ADC.
pub struct MockAdc {
    pattern: Vec<u16, MAX_PATTERN>,
    pos: usize,
    error: Option<AdcError>,
    conversions: u32,
}

impl MockAdc {
    /// Mock that always reads the given constant value.
    pub fn constant(value: u16) -> Self {
        let mut pattern = Vec::new();
        // Single-element pattern; push to a fresh Vec cannot fail.
        let _ = pattern.push(value);
        Self {
            pattern,
            pos: 0,
            error: None,
            conversions: 0,
        }
    }

    /// Mock that cycles through `samples`.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty or longer than [`MAX_PATTERN`].
    pub fn with_pattern(samples: &[u16]) -> Self {
        assert!(!samples.is_empty(), "pattern must not be empty");
        let pattern = Vec::from_slice(samples).expect("pattern exceeds MAX_PATTERN");
        Self {
            pattern,
            pos: 0,
            error: None,
            conversions: 0,
        }
    }

    /// Make every subsequent conversion fail with `error`.
    pub fn set_error(&mut self, error: AdcError) {
        self.error = Some(error);
    }

    /// Restore successful conversions.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Number of conversions attempted (including failed ones).
    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl AdcSource for MockAdc {
    async fn sample(&mut self) -> Result<u16, AdcError> {
        self.conversions += 1;
        if let Some(error) = self.error {
            return Err(error);
        }
        let value = self.pattern[self.pos];
        self.pos = (self.pos + 1) % self.pattern.len();
        Ok(value)
    }

    fn full_scale(&self) -> u16 {
        4095
    }
}
