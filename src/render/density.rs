use image::{Rgba, RgbaImage};

use crate::{
    foundation::{
        core::{Canvas, Point},
        error::{PlaceheatError, PlaceheatResult},
    },
    render::{composite::mul_div255, scheme::Scheme},
};

pub const DOT_RADIUS: u32 = 2;
pub const MAX_OPACITY: u8 = 255;

// Dot intensity at the centre and at distance `radius`.
const DOT_PEAK: f32 = 0.8;
const DOT_RIM: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DensityParams {
    /// Splat radius in pixels.
    pub dot_radius: u32,
    /// Ceiling applied to every output alpha.
    pub opacity: u8,
    pub scheme: Scheme,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            dot_radius: DOT_RADIUS,
            opacity: MAX_OPACITY,
            scheme: Scheme::default(),
        }
    }
}

impl DensityParams {
    pub fn validate(&self) -> PlaceheatResult<()> {
        if self.dot_radius == 0 {
            return Err(PlaceheatError::render("dot radius must be > 0"));
        }
        Ok(())
    }
}

/// Turns a point sequence into a straight-alpha raster of exactly `canvas` bounds.
///
/// Pixels with no nearby points should be fully transparent.
pub trait DensityRenderer {
    fn render(
        &self,
        canvas: Canvas,
        points: &[Point],
        params: &DensityParams,
    ) -> PlaceheatResult<RgbaImage>;
}

/// Splat-and-colourise renderer working directly on a density buffer.
///
/// Points are Cartesian: column `floor(x)`, row `height - floor(y)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SplatRenderer;

impl DensityRenderer for SplatRenderer {
    #[tracing::instrument(skip(self, points), fields(points = points.len()))]
    fn render(
        &self,
        canvas: Canvas,
        points: &[Point],
        params: &DensityParams,
    ) -> PlaceheatResult<RgbaImage> {
        let canvas = canvas.validate()?;
        params.validate()?;

        let field = accumulate(canvas, points, params.dot_radius);
        let img = colorize(canvas, &field, params);
        tracing::info!("made heatmap");
        Ok(img)
    }
}

pub fn to_pixel(canvas: Canvas, p: Point) -> (i64, i64) {
    (
        p.x.floor() as i64,
        i64::from(canvas.height).saturating_sub(p.y.floor() as i64),
    )
}

/// Offsets and weights of one dot, row-major.
fn dot_kernel(radius: u32) -> Vec<(i64, i64, f32)> {
    let r = i64::from(radius);
    let rf = radius as f32;
    let mut kernel = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            let d = ((dx * dx + dy * dy) as f32).sqrt();
            if d <= rf {
                kernel.push((dx, dy, DOT_PEAK - (DOT_PEAK - DOT_RIM) * d / rf));
            }
        }
    }
    kernel
}

/// Per-pixel density in `[0, 1]`, row-major.
fn accumulate(canvas: Canvas, points: &[Point], radius: u32) -> Vec<f32> {
    let kernel = dot_kernel(radius);
    let width = canvas.width as usize;
    let mut field = vec![0.0f32; canvas.pixel_count()];

    let mut outside = 0usize;
    for &p in points {
        let (col, row) = to_pixel(canvas, p);
        if !canvas.contains(col, row) {
            outside += 1;
        }
        for &(dx, dy, w) in &kernel {
            let (c, r) = (col.saturating_add(dx), row.saturating_add(dy));
            if !canvas.contains(c, r) {
                continue;
            }
            let a = &mut field[r as usize * width + c as usize];
            *a = w + *a * (1.0 - w);
        }
    }

    if outside > 0 {
        tracing::debug!(outside, "points centred outside the canvas");
    }
    field
}

fn colorize(canvas: Canvas, field: &[f32], params: &DensityParams) -> RgbaImage {
    let ramp = params.scheme.ramp();
    let mut img = RgbaImage::new(canvas.width, canvas.height);
    for (px, &d) in img.pixels_mut().zip(field) {
        if d <= 0.0 {
            continue;
        }
        let [r, g, b, a] = ramp.sample(d);
        *px = Rgba([r, g, b, mul_div255(u16::from(a), u16::from(params.opacity))]);
    }
    img
}
