use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use image::{ExtendedColorType, ImageEncoder, RgbaImage, codecs::png::PngEncoder};

use crate::foundation::error::{PlaceheatError, PlaceheatResult};

/// Encode `img` as an RGBA8 PNG in memory.
pub fn encode_png(img: &RgbaImage) -> PlaceheatResult<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| PlaceheatError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

pub fn ensure_parent_dir(path: &Path) -> PlaceheatResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            PlaceheatError::encode(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Encode `img` and write it to `path`, truncating any existing file.
///
/// Encoding happens before the file is created, so an encode failure leaves the
/// filesystem untouched. Returns the number of bytes written.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_png(path: &Path, img: &RgbaImage) -> PlaceheatResult<u64> {
    let bytes = encode_png(img)?;
    ensure_parent_dir(path)?;

    let write_err =
        |e: std::io::Error| PlaceheatError::encode(format!("write '{}': {e}", path.display()));
    let file = File::create(path).map_err(write_err)?;
    let mut w = BufWriter::new(file);
    w.write_all(&bytes).map_err(write_err)?;
    w.flush().map_err(write_err)?;

    tracing::info!(bytes = bytes.len(), "wrote png");
    Ok(bytes.len() as u64)
}
