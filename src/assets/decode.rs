use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::error::{MorphError, MorphResult},
    raster::buffer::PixelBuffer,
};

/// Decode encoded image bytes into a buffer with `channels` channels (1 to 4).
pub fn decode_image(bytes: &[u8], channels: u32) -> MorphResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    convert(dyn_img, channels)
}

/// Load an image file, converting it to `channels` channels (1 to 4).
///
/// Loading both morph inputs with the same channel count keeps them blend-compatible whatever
/// their on-disk formats.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_image(path: &Path, channels: u32) -> MorphResult<PixelBuffer> {
    let dyn_img =
        image::open(path).with_context(|| format!("load image '{}'", path.display()))?;
    convert(dyn_img, channels)
}

/// Write `image` to `path`, with the format picked from the file extension.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn save_image(image: &PixelBuffer, path: &Path) -> MorphResult<()> {
    let color = match image.channels() {
        1 => image::ColorType::L8,
        2 => image::ColorType::La8,
        3 => image::ColorType::Rgb8,
        4 => image::ColorType::Rgba8,
        n => {
            return Err(MorphError::validation(format!(
                "cannot save a {n}-channel image"
            )));
        }
    };
    let format = image::ImageFormat::from_path(path).map_err(|_| {
        MorphError::validation(format!(
            "unsupported output image format: '{}'",
            path.display()
        ))
    })?;

    image::save_buffer_with_format(
        path,
        image.data(),
        image.width(),
        image.height(),
        color,
        format,
    )
    .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

fn convert(dyn_img: image::DynamicImage, channels: u32) -> MorphResult<PixelBuffer> {
    let (width, height) = (dyn_img.width(), dyn_img.height());
    let data = match channels {
        1 => dyn_img.to_luma8().into_raw(),
        2 => dyn_img.to_luma_alpha8().into_raw(),
        3 => dyn_img.to_rgb8().into_raw(),
        4 => dyn_img.to_rgba8().into_raw(),
        n => {
            return Err(MorphError::validation(format!(
                "images can be loaded with 1 to 4 channels, not {n}"
            )));
        }
    };
    PixelBuffer::from_vec(width, height, channels, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
