//! Initial PV conditions.

use rand::Rng;

use crate::grid::{PhysicalField, SpectralGrid};

/// Upper bound of the seeded PV anomalies.
pub const PV_NOISE_AMPLITUDE: f64 = 1e-3;

/// Small-amplitude PV noise, uniform over `[0, PV_NOISE_AMPLITUDE)`.
///
/// The random source is passed in so runs are reproducible under a seed.
///
/// # Example
///
/// ```
/// use qg_rs::grid::SpectralGrid;
/// use qg_rs::initial::pv_noise;
/// use rand::SeedableRng;
///
/// let grid = SpectralGrid::new(8, 8, 1.0e6, 1.0e6).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let q = pv_noise(&grid, 1, &mut rng);
/// assert_eq!(q.shape(), (1, 8, 8));
/// ```
pub fn pv_noise<R: Rng + ?Sized>(grid: &SpectralGrid, n_layers: usize, rng: &mut R) -> PhysicalField {
    let mut q = grid.physical_zeros(n_layers);
    for v in &mut q.data {
        *v = PV_NOISE_AMPLITUDE * rng.gen::<f64>();
    }
    q
}
