use crate::{
    foundation::error::MorphResult,
    raster::buffer::{PixelBuffer, ensure_same_dims},
};

/// Cross-dissolve one channel value: `floor(t * a + (1 - t) * b)`.
///
/// Evaluated as `b + t * (a - b)`, which is exact when `a == b` and at `t = 0` / `t = 1`.
#[inline]
pub fn blend_px(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (b + t * (a - b)).floor().clamp(0.0, 255.0) as u8
}

/// Per-pixel linear blend: weight `t` on `img1`, `1 - t` on `img2`.
///
/// # Errors
/// [`crate::MorphError::DimensionMismatch`] unless both images share width, height and
/// channel count.
#[tracing::instrument(skip(img1, img2), fields(width = img1.width(), height = img1.height()))]
pub fn blend(img1: &PixelBuffer, img2: &PixelBuffer, t: f64) -> MorphResult<PixelBuffer> {
    ensure_same_dims(img1, img2)?;

    let mut out = img1.zeroed_like();
    for ((d, &a), &b) in out
        .data_mut()
        .iter_mut()
        .zip(img1.data())
        .zip(img2.data())
    {
        *d = blend_px(a, b, t);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
