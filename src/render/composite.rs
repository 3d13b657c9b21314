use image::{Rgba, RgbaImage};

use crate::foundation::error::{PlaceheatError, PlaceheatResult};

pub type Rgba8 = [u8; 4];

/// Source-over of a straight-alpha `src` onto an opaque `dst`.
///
/// `out = src * a + dst * (1 - a)` per colour channel, alpha stays opaque.
pub fn over_opaque(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return [src[0], src[1], src[2], 255];
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), u16::from(sa));
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

pub fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage) -> PlaceheatResult<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(PlaceheatError::render(format!(
            "over_in_place expects equal bounds, got {:?} and {:?}",
            dst.dimensions(),
            src.dimensions()
        )));
    }
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        *d = Rgba(over_opaque(d.0, s.0));
    }
    Ok(())
}

/// An opaque raster filled with `rgb`.
pub fn solid_background(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Flatten `raster` onto an opaque background of the same bounds.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn flatten_over(raster: &RgbaImage, background: [u8; 3]) -> PlaceheatResult<RgbaImage> {
    let mut out = solid_background(raster.width(), raster.height(), background);
    over_in_place(&mut out, raster)?;
    Ok(out)
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}
