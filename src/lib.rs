//! # qg-rs
//!
//! Physics closure for a single-layer quasi-geostrophic model driven by a
//! pseudo-spectral engine.
//!
//! This crate provides the model-specific pieces the engine calls into:
//! - Background state (mean zonal flow, PV gradient, linear-term phase factor)
//! - PV inversion operator (diagonal in spectral space)
//! - Forcing hook (no forcing, no drag, no filtering)
//! - Diagnostics (CFL number, kinetic energy, eddy turnover time)
//! - The spectral grid descriptor and layered field types these consume

pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod initial;
pub mod model;
pub mod types;

// Re-export main types for convenience
pub use diagnostics::{
    DiagnosticsCadence, DiagnosticsTracker, FlowState, QgDiagnostics, YEAR, calc_cfl,
    calc_eddy_time, calc_ke,
};
pub use error::{QgError, QgResult};
pub use grid::{LayerField, PhysicalField, SpectralField, SpectralGrid};
pub use initial::pv_noise;
pub use model::{
    BackgroundState, BarotropicModel, BarotropicParams, ForcingHook, InversionOperator,
    NoForcing, QgModel, QgModelInfo, SpectralEngine, initialize_model,
};
pub use types::{DeformationRadius, LayerProfile};
