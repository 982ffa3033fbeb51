//! Doubly periodic spectral grid descriptor.
//!
//! Wavenumbers follow the real-FFT layout: the zonal wavenumber `k` keeps only
//! the non-negative half (`nk = nx/2 + 1` columns), the meridional wavenumber
//! `l` runs over the full FFT ordering (`nl = ny` rows):
//!
//! ```text
//! k = 2π/Lx · [0, 1, ..., nx/2]
//! l = 2π/Ly · [0, 1, ..., ny/2 - 1, -ny/2, ..., -1]
//! ```
//!
//! All wavenumber arrays are stored row-major with shape `(nl, nk)`.

use std::f64::consts::PI;

use super::field::{PhysicalField, SpectralField};
use crate::error::{QgError, QgResult};

/// Spectral grid descriptor for a doubly periodic domain.
#[derive(Clone, Debug)]
pub struct SpectralGrid {
    /// Number of grid points in x
    pub nx: usize,
    /// Number of grid points in y
    pub ny: usize,
    /// Number of zonal wavenumbers kept by the real FFT (nx/2 + 1)
    pub nk: usize,
    /// Number of meridional wavenumbers (ny)
    pub nl: usize,
    /// Domain length in x (m)
    pub lx: f64,
    /// Domain length in y (m)
    pub ly: f64,
    /// Grid spacing in x (m)
    pub dx: f64,
    /// Grid spacing in y (m)
    pub dy: f64,
    /// Zonal wavenumber mesh
    pub k: Vec<f64>,
    /// Meridional wavenumber mesh
    pub l: Vec<f64>,
    /// Isotropic wavenumber magnitude sqrt(k² + l²)
    pub wv: Vec<f64>,
    /// Squared wavenumber k² + l²
    pub wv2: Vec<f64>,
    /// Inverse squared wavenumber, 0 at the zero wavenumber
    pub wv2i: Vec<f64>,
}

impl SpectralGrid {
    /// Build the standard real-FFT grid for an `nx × ny` domain of size `lx × ly`.
    pub fn new(nx: usize, ny: usize, lx: f64, ly: f64) -> QgResult<Self> {
        validate_extents(nx, ny, lx, ly)?;

        let nk = nx / 2 + 1;
        let nl = ny;
        let dk = 2.0 * PI / lx;
        let dl = 2.0 * PI / ly;

        let mut k = Vec::with_capacity(nl * nk);
        let mut l = Vec::with_capacity(nl * nk);
        for j in 0..nl {
            let lj = if j < ny / 2 {
                j as f64
            } else {
                j as f64 - ny as f64
            };
            for i in 0..nk {
                k.push(dk * i as f64);
                l.push(dl * lj);
            }
        }

        Self::from_wavenumbers(nx, ny, lx, ly, k, l)
    }

    /// Build a grid from caller-supplied wavenumber meshes of shape `(ny, nx/2 + 1)`.
    ///
    /// The isotropic arrays `wv`, `wv2` and `wv2i` are derived from `k` and `l`.
    pub fn from_wavenumbers(
        nx: usize,
        ny: usize,
        lx: f64,
        ly: f64,
        k: Vec<f64>,
        l: Vec<f64>,
    ) -> QgResult<Self> {
        validate_extents(nx, ny, lx, ly)?;

        let nk = nx / 2 + 1;
        let nl = ny;
        let n = nl * nk;
        if k.len() != n || l.len() != n {
            return Err(QgError::InvalidGrid(format!(
                "wavenumber meshes must have {} entries ({}x{}), got k={} l={}",
                n,
                nl,
                nk,
                k.len(),
                l.len()
            )));
        }

        let wv2: Vec<f64> = k.iter().zip(&l).map(|(&kk, &ll)| kk * kk + ll * ll).collect();
        let wv: Vec<f64> = wv2.iter().map(|&w| w.sqrt()).collect();
        let wv2i: Vec<f64> = wv2
            .iter()
            .map(|&w| if w != 0.0 { 1.0 / w } else { 0.0 })
            .collect();

        Ok(Self {
            nx,
            ny,
            nk,
            nl,
            lx,
            ly,
            dx: lx / nx as f64,
            dy: ly / ny as f64,
            k,
            l,
            wv,
            wv2,
            wv2i,
        })
    }

    /// Number of physical grid points `M = nx · ny`.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of spectral coefficients per layer `nl · nk`.
    #[inline]
    pub fn n_wavenumbers(&self) -> usize {
        self.nl * self.nk
    }

    /// Zero physical field with `n_layers` layers.
    pub fn physical_zeros(&self, n_layers: usize) -> PhysicalField {
        PhysicalField::zeros(n_layers, self.ny, self.nx)
    }

    /// Zero spectral field with `n_layers` layers.
    pub fn spectral_zeros(&self, n_layers: usize) -> SpectralField {
        SpectralField::zeros(n_layers, self.nl, self.nk)
    }

    /// Fail unless `field` lives on this grid's physical mesh.
    pub fn check_physical(&self, field: &PhysicalField) -> QgResult<()> {
        if field.n_rows != self.ny || field.n_cols != self.nx {
            return Err(QgError::shape_mismatch(
                format!("physical {}x{}", self.ny, self.nx),
                format!("{}x{}", field.n_rows, field.n_cols),
            ));
        }
        Ok(())
    }

    /// Fail unless `field` lives on this grid's wavenumber mesh.
    pub fn check_spectral(&self, field: &SpectralField) -> QgResult<()> {
        if field.n_rows != self.nl || field.n_cols != self.nk {
            return Err(QgError::shape_mismatch(
                format!("spectral {}x{}", self.nl, self.nk),
                format!("{}x{}", field.n_rows, field.n_cols),
            ));
        }
        Ok(())
    }

    /// Physical-space variance of each layer, estimated from its spectrum.
    ///
    /// Parseval's relation for the real FFT: every coefficient stands for
    /// itself and its conjugate partner, except the `k = 0` and `k = nx/2`
    /// columns which have no partner in the stored half-plane.
    ///
    /// ```text
    /// var = Σ 2|φ̂|² / M²   (halved on the first and last k columns)
    /// ```
    pub fn spec_var(&self, field: &SpectralField) -> QgResult<Vec<f64>> {
        self.check_spectral(field)?;

        let m = self.n_points() as f64;
        let norm = 2.0 / (m * m);
        let last = self.nk - 1;

        let variances = (0..field.n_layers)
            .map(|z| {
                let layer = field.layer(z);
                let mut var = 0.0;
                for j in 0..self.nl {
                    for i in 0..self.nk {
                        let mut dens = norm * layer[j * self.nk + i].norm_sqr();
                        if i == 0 || i == last {
                            dens *= 0.5;
                        }
                        var += dens;
                    }
                }
                var
            })
            .collect();

        Ok(variances)
    }
}

fn validate_extents(nx: usize, ny: usize, lx: f64, ly: f64) -> QgResult<()> {
    if nx == 0 || ny == 0 || nx % 2 != 0 || ny % 2 != 0 {
        return Err(QgError::InvalidGrid(format!(
            "nx and ny must be positive and even, got {}x{}",
            nx, ny
        )));
    }
    if !(lx.is_finite() && ly.is_finite() && lx > 0.0 && ly > 0.0) {
        return Err(QgError::InvalidGrid(format!(
            "domain extents must be positive, got {} x {}",
            lx, ly
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_real_fft_layout() {
        let grid = SpectralGrid::new(4, 4, 2.0 * PI, 2.0 * PI).unwrap();
        assert_eq!(grid.nk, 3);
        assert_eq!(grid.nl, 4);
        assert_eq!(grid.k.len(), 12);

        // Unit wavenumber spacing for a 2π domain
        assert_eq!(&grid.k[0..3], &[0.0, 1.0, 2.0]);
        let l_column: Vec<f64> = (0..4).map(|j| grid.l[j * 3]).collect();
        assert_eq!(l_column, vec![0.0, 1.0, -2.0, -1.0]);

        assert!((grid.dx - PI / 2.0).abs() < TOL);
        assert!((grid.dy - PI / 2.0).abs() < TOL);
    }

    #[test]
    fn test_isotropic_arrays() {
        let grid = SpectralGrid::new(4, 4, 2.0 * PI, 2.0 * PI).unwrap();
        // Row 1 (l = 1), column 2 (k = 2)
        let idx = 3 + 2;
        assert!((grid.wv2[idx] - 5.0).abs() < TOL);
        assert!((grid.wv[idx] - 5.0_f64.sqrt()).abs() < TOL);
        assert!((grid.wv2i[idx] - 0.2).abs() < TOL);

        // Zero wavenumber is sanitized
        assert_eq!(grid.wv2[0], 0.0);
        assert_eq!(grid.wv2i[0], 0.0);
        assert!(grid.wv2i.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(matches!(
            SpectralGrid::new(3, 4, 1.0, 1.0),
            Err(QgError::InvalidGrid(_))
        ));
        assert!(SpectralGrid::new(0, 4, 1.0, 1.0).is_err());
        assert!(SpectralGrid::new(4, 4, -1.0, 1.0).is_err());
        assert!(SpectralGrid::from_wavenumbers(4, 4, 1.0, 1.0, vec![0.0; 3], vec![0.0; 12]).is_err());
    }

    #[test]
    fn test_spec_var_of_single_mode() {
        // A cosine of unit amplitude, cos(x), on an 8x8 grid has variance 1/2.
        // Its real FFT has a single coefficient M/2 at (l = 0, k = 1).
        let grid = SpectralGrid::new(8, 8, 2.0 * PI, 2.0 * PI).unwrap();
        let mut ph = grid.spectral_zeros(1);
        let m = grid.n_points() as f64;
        ph.set(0, 0, 1, Complex64::new(m / 2.0, 0.0));

        let var = grid.spec_var(&ph).unwrap();
        assert_eq!(var.len(), 1);
        assert!((var[0] - 0.5).abs() < TOL);
    }

    #[test]
    fn test_spec_var_halves_edge_columns() {
        // A constant field c has a single DC coefficient c·M. spec_var
        // measures the mean square, so the result is c².
        let grid = SpectralGrid::new(4, 4, 1.0, 1.0).unwrap();
        let mut ph = grid.spectral_zeros(1);
        let m = grid.n_points() as f64;
        ph.set(0, 0, 0, Complex64::new(3.0 * m, 0.0));

        let var = grid.spec_var(&ph).unwrap();
        assert!((var[0] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_spec_var_rejects_wrong_shape() {
        let grid = SpectralGrid::new(4, 4, 1.0, 1.0).unwrap();
        let bad = SpectralField::zeros(1, 4, 4);
        assert!(grid.spec_var(&bad).is_err());
    }
}
