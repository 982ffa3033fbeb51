//! Model capability traits.
//!
//! The engine drives a model only through these hooks, so model variants
//! (barotropic, layered) plug into the same time loop without sharing a base
//! type.

use crate::diagnostics::{DiagnosticsCadence, FlowState, QgDiagnostics};
use crate::error::QgResult;
use crate::grid::{PhysicalField, SpectralGrid};

// =============================================================================
// QgModelInfo Trait (non-generic, dyn-compatible)
// =============================================================================

/// Descriptive information about a model variant.
pub trait QgModelInfo: Send + Sync {
    /// Human-readable name for debugging and logging.
    fn name(&self) -> &'static str;

    /// Short description of the physics being modeled.
    fn description(&self) -> &str;

    /// Number of fluid layers.
    fn n_layers(&self) -> usize;
}

// =============================================================================
// QgModel Trait
// =============================================================================

/// Hooks a QG model variant supplies to the spectral engine.
///
/// The engine calls, in order, [`init_background`](Self::init_background),
/// [`init_inversion`](Self::init_inversion) and
/// [`init_forcing`](Self::init_forcing) once the grid exists (see
/// [`initialize_model`]), then [`on_diagnostics_cycle`](Self::on_diagnostics_cycle)
/// from its time loop.
pub trait QgModel: QgModelInfo {
    /// Set up the background flow and PV gradients.
    fn init_background(&mut self, grid: &SpectralGrid) -> QgResult<()>;

    /// Build the PV-to-streamfunction inversion operator.
    fn init_inversion(&mut self, grid: &SpectralGrid) -> QgResult<()>;

    /// Set up forcing and dissipation.
    ///
    /// Default implementation does nothing.
    fn init_forcing(&mut self, _grid: &SpectralGrid) -> QgResult<()> {
        Ok(())
    }

    /// Compute diagnostics if the cadence fires for this step.
    ///
    /// Returns `Ok(None)` on steps the cadence skips. Must not modify engine
    /// state.
    fn on_diagnostics_cycle(
        &self,
        state: &FlowState<'_>,
        cadence: &DiagnosticsCadence,
    ) -> QgResult<Option<QgDiagnostics>>;
}

// =============================================================================
// SpectralEngine Trait
// =============================================================================

/// The parts of the spectral engine a model uses during construction.
pub trait SpectralEngine {
    /// The engine's spectral grid.
    fn grid(&self) -> &SpectralGrid;

    /// Replace the PV field with `q` given in physical space.
    fn set_q(&mut self, q: PhysicalField) -> QgResult<()>;
}

/// Run the initialization hooks in their fixed order.
pub fn initialize_model<M: QgModel + ?Sized>(model: &mut M, grid: &SpectralGrid) -> QgResult<()> {
    model.init_background(grid)?;
    model.init_inversion(grid)?;
    model.init_forcing(grid)?;
    log::debug!(
        "initialized {} model on {}x{} grid",
        model.name(),
        grid.nx,
        grid.ny
    );
    Ok(())
}
