//! Forcing and dissipation hook.
//!
//! The barotropic model applies no forcing, drag or spectral filtering. The
//! hook exists so every model variant goes through the same initialization
//! sequence.
//!
//! # Reference design (not enabled)
//!
//! A high-wavenumber exponential filter after Arbic and Flierl (2003) would
//! slot in here:
//!
//! ```text
//! wvx    = sqrt((k·dx)² + (l·dy)²)
//! filtr  = exp(-filterfac · (wvx - cphi)⁴)   for wvx > cphi
//!        = 1                                 for wvx <= cphi
//! cphi   = 0.65 π,  filterfac = 23.6
//! q̂     ← filtr · q̂
//! ```
//!
//! together with a linear drag `rek`. Neither is applied by [`NoForcing`].

use crate::error::QgResult;
use crate::grid::{SpectralField, SpectralGrid};

/// Extension point for forcing, drag and spectral filtering.
pub trait ForcingHook: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Precompute anything that depends on the grid.
    ///
    /// Default implementation does nothing.
    fn initialize(&mut self, _grid: &SpectralGrid) -> QgResult<()> {
        Ok(())
    }

    /// Apply the forcing to PV coefficients in place.
    ///
    /// Default implementation leaves `qh` untouched.
    fn apply(&self, _qh: &mut SpectralField) {}
}

/// No forcing, no drag, no filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoForcing;

impl ForcingHook for NoForcing {
    fn name(&self) -> &'static str {
        "none"
    }
}
