//! Strongly-typed parameter types for safer APIs.
//!
//! - [`DeformationRadius`]: radius with the `0 = infinite` sentinel made explicit
//! - [`LayerProfile`]: uniform or per-layer values, expanded at the boundary
//!
//! # Example
//!
//! ```
//! use qg_rs::types::{DeformationRadius, LayerProfile};
//!
//! let rd = DeformationRadius::new(0.0).unwrap();
//! assert_eq!(rd.kd2(), 0.0);
//!
//! let u = LayerProfile::uniform(0.1);
//! assert_eq!(u.expand(1).unwrap(), vec![0.1]);
//! ```

mod layer;
mod physical;

pub use layer::LayerProfile;
pub use physical::DeformationRadius;
