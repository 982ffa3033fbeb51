//! Runtime diagnostics for QG simulations.
//!
//! - [`calc_cfl`], [`calc_ke`], [`calc_eddy_time`]: pure scalar reductions
//! - [`DiagnosticsCadence`]: when the engine should run a diagnostics cycle
//! - [`QgDiagnostics`], [`DiagnosticsTracker`]: snapshots and their accumulation

mod cadence;
mod reducers;
mod tracker;

pub use cadence::DiagnosticsCadence;
#[cfg(feature = "parallel")]
pub use reducers::calc_cfl_parallel;
pub use reducers::{FlowState, YEAR, calc_cfl, calc_eddy_time, calc_enstrophy, calc_ke};
pub use tracker::{DiagnosticsTracker, QgDiagnostics};
