//! Physical quantity newtypes for model parameters.
//!
//! These types keep the sentinel and sign conventions of the physical
//! constants in one place instead of spreading them through numerical code.

use std::fmt;

use crate::error::{QgError, QgResult};

// =============================================================================
// DeformationRadius
// =============================================================================

/// Rossby deformation radius (m).
///
/// # Convention
///
/// A radius of exactly zero is the sentinel for an infinite deformation
/// radius, i.e. the non-stratified barotropic limit. In that case the squared
/// deformation wavenumber is zero, not infinite.
///
/// # Example
///
/// ```
/// use qg_rs::types::DeformationRadius;
///
/// let rd = DeformationRadius::new(25.0e3).unwrap();
/// assert_eq!(rd.kd2(), 25.0e3_f64.powi(-2));
///
/// let infinite = DeformationRadius::INFINITE;
/// assert_eq!(infinite.kd2(), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct DeformationRadius(f64);

impl DeformationRadius {
    /// Infinite deformation radius (stored as the zero sentinel).
    pub const INFINITE: Self = Self(0.0);

    /// Create a deformation radius, rejecting negative or non-finite values.
    pub fn new(meters: f64) -> QgResult<Self> {
        if !meters.is_finite() {
            return Err(QgError::InvalidConfig(format!(
                "deformation radius must be finite, got {}",
                meters
            )));
        }
        if meters < 0.0 {
            return Err(QgError::InvalidConfig(format!(
                "deformation radius must be non-negative (0 means infinite), got {}",
                meters
            )));
        }
        Ok(Self(meters))
    }

    /// Get the radius in meters (0 for the infinite sentinel).
    #[inline]
    pub fn meters(self) -> f64 {
        self.0
    }

    /// Whether this is the infinite-radius sentinel.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.0 == 0.0
    }

    /// Squared deformation wavenumber `rd⁻²`, or 0 for an infinite radius.
    #[inline]
    pub fn kd2(self) -> f64 {
        if self.is_infinite() {
            0.0
        } else {
            self.0.powi(-2)
        }
    }
}

impl Default for DeformationRadius {
    fn default() -> Self {
        Self::INFINITE
    }
}

impl fmt::Display for DeformationRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "{:.1}m", self.0)
        }
    }
}

impl From<DeformationRadius> for f64 {
    #[inline]
    fn from(rd: DeformationRadius) -> f64 {
        rd.0
    }
}
