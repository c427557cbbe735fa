// Raster helpers - decode validation and the transparent outpaint canvas

use super::frame::NativeRegion;
use super::types::ImageData;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Decode an encoded image, returning its pixels
pub fn decode(image: &ImageData) -> Result<DynamicImage, RasterError> {
    let format = ImageFormat::from_mime_type(&image.mime_type);
    let decoded = match format {
        Some(format) => image::load_from_memory_with_format(&image.bytes, format),
        None => image::load_from_memory(&image.bytes),
    };
    decoded.map_err(|e| RasterError::Decode(e.to_string()))
}

/// Native pixel dimensions of an encoded image
pub fn dimensions(image: &ImageData) -> Result<(u32, u32), RasterError> {
    let decoded = decode(image)?;
    Ok((decoded.width(), decoded.height()))
}

/// Paint the image at its native size onto a transparent canvas covering `region`.
///
/// Canvas pixels the image does not reach stay fully transparent; those are the
/// areas an outpaint request asks the generator to fill. The result is PNG so the
/// alpha channel survives.
pub fn extend_canvas(image: &ImageData, region: &NativeRegion) -> Result<ImageData, RasterError> {
    let source = decode(image)?.to_rgba8();
    let (width, height) = region.canvas_size();
    let (left, top) = region.image_offset();

    tracing::debug!(
        "Extending {}x{} image onto {}x{} canvas at ({}, {})",
        source.width(),
        source.height(),
        width,
        height,
        left,
        top
    );

    let mut canvas = RgbaImage::new(width, height);
    image::imageops::overlay(&mut canvas, &source, left, top);

    encode_png(DynamicImage::ImageRgba8(canvas))
}

pub fn encode_png(image: DynamicImage) -> Result<ImageData, RasterError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RasterError::Encode(e.to_string()))?;
    Ok(ImageData::new("image/png", bytes))
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode image: {0}")]
    Encode(String),
}
