//! Spectral grid descriptor and layered field storage.
//!
//! - [`SpectralGrid`]: wavenumber meshes, grid spacing and the spectral
//!   variance reduction
//! - [`LayerField`]: dense `(layer, row, col)` storage, with the
//!   [`PhysicalField`] and [`SpectralField`] aliases

mod field;
mod spectral_grid;

pub use field::{LayerField, PhysicalField, SpectralField};
pub use spectral_grid::SpectralGrid;
