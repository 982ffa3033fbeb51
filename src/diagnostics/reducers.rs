//! Scalar diagnostics of the instantaneous flow.
//!
//! All reductions are pure functions of engine-owned state:
//!
//! ```text
//! CFL  = max(|u + Ubg|, |v|) · dt / dx
//! KE   = ½ · Σ spec_var(wv · ψ̂)
//! ens  = ½ · H · Σ spec_var(wv² · ψ̂)
//! Teddy = 2π · sqrt(H / ens) / year
//! ```
//!
//! Non-finite input surfaces as non-finite output: a NaN velocity gives a NaN
//! CFL number and a blown-up streamfunction gives a NaN eddy time.

use std::f64::consts::PI;

use crate::error::{QgError, QgResult};
use crate::grid::{PhysicalField, SpectralField, SpectralGrid};

/// Seconds in the model's 360-day year.
pub const YEAR: f64 = 360.0 * 86400.0;

/// Read-only view of the engine state a diagnostics cycle needs.
#[derive(Clone, Copy, Debug)]
pub struct FlowState<'a> {
    /// Spectral grid
    pub grid: &'a SpectralGrid,
    /// Zonal velocity anomaly, physical space
    pub u: &'a PhysicalField,
    /// Meridional velocity, physical space
    pub v: &'a PhysicalField,
    /// Streamfunction coefficients
    pub ph: &'a SpectralField,
    /// Elapsed model time (s)
    pub t: f64,
    /// Timestep (s)
    pub dt: f64,
    /// Step counter
    pub tc: u64,
}

fn check_velocity(u: &PhysicalField, v: &PhysicalField, ubg: &[f64]) -> QgResult<()> {
    u.check_same_shape(v)?;
    if ubg.len() != u.n_layers {
        return Err(QgError::shape_mismatch(
            format!("{} background velocities", u.n_layers),
            format!("{}", ubg.len()),
        ));
    }
    Ok(())
}

/// `f64::max` that keeps NaN instead of dropping it.
#[inline]
fn max_propagating_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[inline]
fn point_speed(u: f64, ubg: f64, v: f64) -> f64 {
    max_propagating_nan((u + ubg).abs(), v.abs())
}

/// Maximum advective Courant number, background flow included.
///
/// Returns NaN if any velocity is NaN.
pub fn calc_cfl(
    u: &PhysicalField,
    v: &PhysicalField,
    ubg: &[f64],
    dt: f64,
    dx: f64,
) -> QgResult<f64> {
    check_velocity(u, v, ubg)?;

    let mut max_speed: f64 = 0.0;
    for (z, &u0) in ubg.iter().enumerate() {
        for (&uu, &vv) in u.layer(z).iter().zip(v.layer(z)) {
            max_speed = max_propagating_nan(max_speed, point_speed(uu, u0, vv));
        }
    }

    Ok(max_speed * dt / dx)
}

/// Parallel version of [`calc_cfl`] using Rayon.
#[cfg(feature = "parallel")]
pub fn calc_cfl_parallel(
    u: &PhysicalField,
    v: &PhysicalField,
    ubg: &[f64],
    dt: f64,
    dx: f64,
) -> QgResult<f64> {
    use rayon::prelude::*;

    check_velocity(u, v, ubg)?;

    let n = u.layer_len();
    let max_speed = u
        .data
        .par_iter()
        .zip(v.data.par_iter())
        .enumerate()
        .map(|(idx, (&uu, &vv))| point_speed(uu, ubg[idx / n], vv))
        .reduce(|| 0.0, max_propagating_nan);

    Ok(max_speed * dt / dx)
}

/// Kinetic energy (m² s⁻²) from streamfunction coefficients.
pub fn calc_ke(grid: &SpectralGrid, ph: &SpectralField) -> QgResult<f64> {
    let var = grid.spec_var(&ph.weighted(&grid.wv)?)?;
    Ok(0.5 * var.iter().sum::<f64>())
}

/// Potential-enstrophy-like quantity `½ · H · spec_var(wv² · ψ̂)`.
pub fn calc_enstrophy(grid: &SpectralGrid, ph: &SpectralField, h: f64) -> QgResult<f64> {
    let var = grid.spec_var(&ph.weighted(&grid.wv2)?)?;
    Ok(0.5 * h * var.iter().sum::<f64>())
}

/// Eddy turnover time in units of [`YEAR`].
///
/// A flow at rest has zero enstrophy and an unbounded turnover time; that
/// case returns `f64::INFINITY` rather than dividing by zero. Non-finite
/// enstrophy returns NaN.
pub fn calc_eddy_time(grid: &SpectralGrid, ph: &SpectralField, h: f64) -> QgResult<f64> {
    let ens = calc_enstrophy(grid, ph, h)?;
    if !ens.is_finite() {
        return Ok(f64::NAN);
    }
    if ens == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(2.0 * PI * (h / ens).sqrt() / YEAR)
}
