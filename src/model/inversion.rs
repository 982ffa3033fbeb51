//! PV inversion operator.
//!
//! Maps PV coefficients to streamfunction coefficients wavenumber by
//! wavenumber. For the barotropic model the elliptic relation
//! `q̂ = -(κ² + kd²) ψ̂` is diagonal, so the operator is a single coefficient
//! per wavenumber:
//!
//! ```text
//! a(l, k) = -(wv2i(l, k) + kd2)
//! ψ̂(l, k) = a(l, k) · q̂(l, k)
//! ```
//!
//! The storage keeps the general `(layer, layer, l, k)` shape so the same
//! apply routine serves multi-layer operators.

use crate::error::{QgError, QgResult};
use crate::grid::{SpectralField, SpectralGrid};

/// Inversion operator with layout `[n_layers, n_layers, nl, nk]`.
#[derive(Clone, Debug, PartialEq)]
pub struct InversionOperator {
    /// Operator entries, `data[((m * n_layers + n) * nl + j) * nk + i]`
    pub data: Vec<f64>,
    /// Number of layers
    pub n_layers: usize,
    /// Number of meridional wavenumbers
    pub nl: usize,
    /// Number of zonal wavenumbers
    pub nk: usize,
}

impl InversionOperator {
    /// Build the diagonal single-layer operator `a = -(wv2i + kd2)`.
    ///
    /// `grid.wv2i` must already have its zero-wavenumber entry sanitized.
    pub fn barotropic(grid: &SpectralGrid, kd2: f64) -> Self {
        let data = grid.wv2i.iter().map(|&w| -(w + kd2)).collect();
        Self {
            data,
            n_layers: 1,
            nl: grid.nl,
            nk: grid.nk,
        }
    }

    /// Shape as `(n_layers, n_layers, nl, nk)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (self.n_layers, self.n_layers, self.nl, self.nk)
    }

    /// Coefficients coupling layer `n` into layer `m`, over all wavenumbers.
    pub fn block(&self, m: usize, n: usize) -> &[f64] {
        let len = self.nl * self.nk;
        let start = (m * self.n_layers + n) * len;
        &self.data[start..start + len]
    }

    /// Entry `a[m, n, j, i]`.
    #[inline]
    pub fn get(&self, m: usize, n: usize, j: usize, i: usize) -> f64 {
        self.block(m, n)[j * self.nk + i]
    }

    /// Recover streamfunction coefficients from PV coefficients.
    ///
    /// `ψ̂[m] = Σ_n a[m, n] · q̂[n]` at every wavenumber.
    pub fn apply(&self, qh: &SpectralField) -> QgResult<SpectralField> {
        if qh.shape() != (self.n_layers, self.nl, self.nk) {
            return Err(QgError::shape_mismatch(
                format!("{:?}", (self.n_layers, self.nl, self.nk)),
                format!("{:?}", qh.shape()),
            ));
        }

        let mut ph = SpectralField::zeros(self.n_layers, self.nl, self.nk);
        for m in 0..self.n_layers {
            for n in 0..self.n_layers {
                let a = self.block(m, n);
                let q = qh.layer(n);
                for ((p, &amn), &qn) in ph.layer_mut(m).iter_mut().zip(a).zip(q) {
                    *p += qn * amn;
                }
            }
        }
        Ok(ph)
    }
}
