use std::path::PathBuf;

use image::RgbaImage;

use crate::{
    encode::png::write_png,
    foundation::{
        core::{BACKGROUND, CANVAS, Canvas, Point},
        error::{PlaceheatError, PlaceheatResult},
    },
    points::parse_points,
    render::{DensityParams, DensityRenderer, flatten_over},
    source::{FetchOptions, Source},
};

/// Everything one conversion run needs.
#[derive(Clone, Debug)]
pub struct ConvertConfig {
    pub source: Source,
    pub out_path: PathBuf,
    pub fetch: FetchOptions,
    pub density: DensityParams,
    pub canvas: Canvas,
    pub background: [u8; 3],
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source: Source::default(),
            out_path: PathBuf::from("out.png"),
            fetch: FetchOptions::default(),
            density: DensityParams::default(),
            canvas: CANVAS,
            background: BACKGROUND,
        }
    }
}

/// What a successful [`convert`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertReport {
    pub points: usize,
    pub canvas: Canvas,
    pub out_path: PathBuf,
    pub bytes_written: u64,
}

/// Render `points` and flatten the result onto the configured background.
///
/// Returns the opaque image that [`convert`] would write.
pub fn render_opaque(
    points: &[Point],
    cfg: &ConvertConfig,
    renderer: &dyn DensityRenderer,
) -> PlaceheatResult<RgbaImage> {
    let raster = renderer.render(cfg.canvas, points, &cfg.density)?;
    if raster.dimensions() != (cfg.canvas.width, cfg.canvas.height) {
        return Err(PlaceheatError::render(format!(
            "renderer returned {:?}, expected {}x{}",
            raster.dimensions(),
            cfg.canvas.width,
            cfg.canvas.height
        )));
    }
    flatten_over(&raster, cfg.background)
}

/// Open the source, parse points, render, flatten and write the PNG.
///
/// Stages run strictly in order and the first error aborts the run. The output file is
/// only created once every earlier stage has succeeded.
#[tracing::instrument(skip_all, fields(source = %cfg.source, out = %cfg.out_path.display()))]
pub fn convert(
    cfg: &ConvertConfig,
    renderer: &dyn DensityRenderer,
) -> PlaceheatResult<ConvertReport> {
    let points = {
        let reader = cfg.source.open(&cfg.fetch)?;
        parse_points(reader)?
    };

    let image = render_opaque(&points, cfg, renderer)?;
    let bytes_written = write_png(&cfg.out_path, &image)?;

    Ok(ConvertReport {
        points: points.len(),
        canvas: cfg.canvas,
        out_path: cfg.out_path.clone(),
        bytes_written,
    })
}
