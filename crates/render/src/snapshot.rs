//! PNG encoding of rendered koi.

use image::{ImageFormat, RgbaImage};
use koi_engine_core::EngineError;
use std::io::Cursor;
use std::path::Path;

/// Encodes `img` as PNG bytes, ready to be served as `image/png`.
///
/// Returns `EngineError::Io` if encoding fails.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| EngineError::Io(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Writes `img` to `path` as a PNG file.
pub fn write_png(img: &RgbaImage, path: &Path) -> Result<(), EngineError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| EngineError::Io(e.to_string()))
}
