//! placeheat turns a CSV of point placements into an opaque density heatmap PNG.
//!
//! The conversion is a strictly forward pipeline:
//!
//! 1. [`Source::open`] yields the CSV bytes (HTTP GET or local file)
//! 2. [`parse_points`] reads columns 1 and 2 and inverts Y against [`CANVAS_HEIGHT`]
//! 3. a [`DensityRenderer`] splats the points into a straight-alpha raster
//! 4. [`flatten_over`] composites it onto black and [`write_png`] stores it
//!
//! [`convert`] runs all four stages.
#![forbid(unsafe_code)]

mod foundation;

pub mod encode;
pub mod pipeline;
pub mod points;
pub mod render;
pub mod source;

pub use crate::foundation::core::{
    BACKGROUND, CANVAS, CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, Point,
};
pub use crate::foundation::error::{PlaceheatError, PlaceheatResult};

pub use crate::encode::png::{encode_png, write_png};
pub use crate::pipeline::{ConvertConfig, ConvertReport, convert, render_opaque};
pub use crate::points::{parse_point, parse_points};
pub use crate::render::{
    ColorRamp, DensityParams, DensityRenderer, Scheme, SplatRenderer, flatten_over,
};
pub use crate::source::{DEFAULT_FILE, DEFAULT_URL, FetchOptions, Source};
