//! Background mean-flow state.
//!
//! For the single-layer model the background PV gradient is purely
//! meridional and horizontally uniform:
//!
//! ```text
//! Qy   = β
//! Ubg  = U
//! ikQy = Qy · i · k      (linear-term phase factor, one per wavenumber)
//! ilQx = 0
//! ```

use num_complex::Complex64;

use crate::error::QgResult;
use crate::grid::{SpectralField, SpectralGrid};
use crate::types::LayerProfile;

/// Mean zonal flow and PV gradients, one entry per layer.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundState {
    /// Meridional background PV gradient per layer
    pub qy: Vec<f64>,
    /// Background zonal velocity per layer
    pub ubg: Vec<f64>,
    /// Precomputed `Qy · i · k`, shape `(n_layers, nl, nk)`
    pub ik_qy: SpectralField,
    /// Zonal background PV gradient term `i · l · Qx` (zero in this model)
    pub il_qx: f64,
}

impl BackgroundState {
    /// Derive the background state from β and U on `grid`.
    ///
    /// Fails with a shape mismatch if either profile does not expand to
    /// `n_layers` values.
    pub fn new(
        grid: &SpectralGrid,
        n_layers: usize,
        beta: &LayerProfile,
        u: &LayerProfile,
    ) -> QgResult<Self> {
        let qy = beta.expand(n_layers)?;
        let ubg = u.expand(n_layers)?;
        let ik_qy = ik_qy(grid, &qy);

        Ok(Self {
            qy,
            ubg,
            ik_qy,
            il_qx: 0.0,
        })
    }

    /// Number of layers.
    pub fn n_layers(&self) -> usize {
        self.qy.len()
    }

    /// Replace the background zonal flow.
    ///
    /// Only `Ubg` changes: `Qy` and `ikQy` depend on β, not U.
    pub fn set_u(&mut self, u: &LayerProfile) -> QgResult<()> {
        self.ubg = u.expand(self.n_layers())?;
        Ok(())
    }
}

fn ik_qy(grid: &SpectralGrid, qy: &[f64]) -> SpectralField {
    let mut out = grid.spectral_zeros(qy.len());
    for (z, &q) in qy.iter().enumerate() {
        for (c, &k) in out.layer_mut(z).iter_mut().zip(&grid.k) {
            *c = Complex64::new(0.0, q * k);
        }
    }
    out
}
