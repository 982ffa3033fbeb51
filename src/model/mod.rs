//! QG model hooks.
//!
//! # Key Traits
//!
//! - [`QgModel`]: initialization hooks and the diagnostics cycle
//! - [`SpectralEngine`]: what a model needs from the engine at construction
//! - [`ForcingHook`]: forcing/dissipation extension point
//!
//! # Example
//! ```
//! use qg_rs::grid::SpectralGrid;
//! use qg_rs::model::{BarotropicModel, BarotropicParams, initialize_model};
//!
//! let grid = SpectralGrid::new(16, 16, 1.0e6, 1.0e6).unwrap();
//! let params = BarotropicParams::default().with_beta(1.5e-11).with_u(0.1);
//!
//! let mut model = BarotropicModel::new(params).unwrap();
//! initialize_model(&mut model, &grid).unwrap();
//! assert_eq!(model.background().unwrap().ubg, vec![0.1]);
//! ```

mod background;
mod barotropic;
mod forcing;
mod inversion;
mod params;
mod traits;

pub use background::BackgroundState;
pub use barotropic::BarotropicModel;
pub use forcing::{ForcingHook, NoForcing};
pub use inversion::InversionOperator;
pub use params::BarotropicParams;
pub use traits::{QgModel, QgModelInfo, SpectralEngine, initialize_model};
