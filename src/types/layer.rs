//! Per-layer parameter profiles.
//!
//! Background quantities such as β and the mean zonal flow U are given either
//! as one value for every layer or as one value per layer. The expansion to
//! the model's layer count happens here, at the boundary, so numerical kernels
//! only ever see slices of exactly `n_layers` values.

use serde::{Deserialize, Serialize};

use crate::error::{QgError, QgResult};

/// A scalar-per-layer parameter.
///
/// Deserializes from either a bare number (`0.1`) or a list (`[0.1]`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayerProfile {
    /// Same value in every layer.
    Uniform(f64),
    /// One value per layer, top to bottom.
    PerLayer(Vec<f64>),
}

impl LayerProfile {
    /// Uniform profile.
    pub fn uniform(value: f64) -> Self {
        Self::Uniform(value)
    }

    /// Explicit per-layer profile.
    pub fn per_layer(values: Vec<f64>) -> Self {
        Self::PerLayer(values)
    }

    /// Expand to exactly `n_layers` values.
    ///
    /// Returns [`QgError::ShapeMismatch`] when a per-layer profile has the
    /// wrong number of entries.
    pub fn expand(&self, n_layers: usize) -> QgResult<Vec<f64>> {
        match self {
            Self::Uniform(value) => Ok(vec![*value; n_layers]),
            Self::PerLayer(values) if values.len() == n_layers => Ok(values.clone()),
            Self::PerLayer(values) => Err(QgError::shape_mismatch(
                format!("{} layer value(s)", n_layers),
                format!("{} layer value(s)", values.len()),
            )),
        }
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Uniform(value) => value.is_finite(),
            Self::PerLayer(values) => values.iter().all(|v| v.is_finite()),
        }
    }
}

impl Default for LayerProfile {
    fn default() -> Self {
        Self::Uniform(0.0)
    }
}

impl From<f64> for LayerProfile {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<f64>> for LayerProfile {
    fn from(values: Vec<f64>) -> Self {
        Self::PerLayer(values)
    }
}
