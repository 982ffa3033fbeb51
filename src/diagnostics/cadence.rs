//! Diagnostics cadence.

use crate::error::{QgError, QgResult};

/// When the diagnostics cycle fires.
///
/// Diagnostics are taken every `taveints` steps, but never before one full
/// timestep has elapsed, so the seeded initial state is not diagnosed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticsCadence {
    taveints: u64,
}

impl DiagnosticsCadence {
    /// Create a cadence firing every `taveints` steps.
    pub fn new(taveints: u64) -> QgResult<Self> {
        if taveints == 0 {
            return Err(QgError::InvalidConfig(
                "diagnostics cadence taveints must be at least 1".to_string(),
            ));
        }
        Ok(Self { taveints })
    }

    /// Fire on every step after the first.
    pub fn every_step() -> Self {
        Self { taveints: 1 }
    }

    /// Steps between diagnostics.
    pub fn taveints(&self) -> u64 {
        self.taveints
    }

    /// Whether diagnostics should be taken at time `t`, step `tc`.
    ///
    /// Both conditions are required: `t >= dt` and `tc % taveints == 0`.
    #[inline]
    pub fn should_fire(&self, t: f64, dt: f64, tc: u64) -> bool {
        t >= dt && tc % self.taveints == 0
    }
}

impl Default for DiagnosticsCadence {
    fn default() -> Self {
        Self::every_step()
    }
}
