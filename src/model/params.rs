//! Physical parameters of the barotropic model.

use serde::{Deserialize, Serialize};

use crate::error::{QgError, QgResult};
use crate::types::{DeformationRadius, LayerProfile};

/// Physical parameters for the single-layer QG model.
///
/// Defaults: β = 0, rd = 0 (infinite deformation radius), H = 1, U = 0.
///
/// # Example
///
/// ```
/// use qg_rs::model::BarotropicParams;
///
/// let params = BarotropicParams::default()
///     .with_beta(1.5e-11)
///     .with_u(0.1);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.kd2().unwrap(), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarotropicParams {
    /// Meridional gradient of the Coriolis parameter β (m⁻¹ s⁻¹)
    pub beta: LayerProfile,
    /// Deformation radius (m); 0 means infinite
    pub rd: f64,
    /// Layer depth H (m)
    #[serde(rename = "H")]
    pub h: f64,
    /// Background zonal velocity U (m/s)
    #[serde(rename = "U")]
    pub u: LayerProfile,
}

impl Default for BarotropicParams {
    fn default() -> Self {
        Self {
            beta: LayerProfile::uniform(0.0),
            rd: 0.0,
            h: 1.0,
            u: LayerProfile::uniform(0.0),
        }
    }
}

impl BarotropicParams {
    /// Set β.
    pub fn with_beta(mut self, beta: impl Into<LayerProfile>) -> Self {
        self.beta = beta.into();
        self
    }

    /// Set the deformation radius.
    pub fn with_rd(mut self, rd: f64) -> Self {
        self.rd = rd;
        self
    }

    /// Set the layer depth.
    pub fn with_depth(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Set the background zonal velocity.
    pub fn with_u(mut self, u: impl Into<LayerProfile>) -> Self {
        self.u = u.into();
        self
    }

    /// Deformation radius with its sentinel handling.
    pub fn deformation_radius(&self) -> QgResult<DeformationRadius> {
        DeformationRadius::new(self.rd)
    }

    /// Squared deformation wavenumber `rd⁻²`, or 0 when `rd = 0`.
    pub fn kd2(&self) -> QgResult<f64> {
        Ok(self.deformation_radius()?.kd2())
    }

    /// Validate parameters.
    pub fn validate(&self) -> QgResult<()> {
        self.deformation_radius()?;
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(QgError::InvalidConfig(format!(
                "layer depth H must be positive, got {}",
                self.h
            )));
        }
        if !self.beta.is_finite() {
            return Err(QgError::InvalidConfig(format!(
                "beta must be finite, got {:?}",
                self.beta
            )));
        }
        if !self.u.is_finite() {
            return Err(QgError::InvalidConfig(format!(
                "background velocity U must be finite, got {:?}",
                self.u
            )));
        }
        Ok(())
    }
}
