//! Density rendering and compositing.
//!
//! [`density`] owns the renderer seam, [`scheme`] the colour ramps and [`composite`] the
//! source-over flattening onto an opaque background.

pub mod composite;
pub mod density;
pub mod scheme;

pub use composite::{flatten_over, solid_background};
pub use density::{DensityParams, DensityRenderer, SplatRenderer};
pub use scheme::{ColorRamp, Scheme};
