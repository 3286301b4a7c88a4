use crate::{foundation::core::Point, raster::buffer::PixelBuffer};

/// Slack added before flooring an interpolated channel.
///
/// Warped coordinates that should land exactly on a lattice point come back off by ~1e-12;
/// without this a stored `v` would read back as `v - 1`.
pub const SAMPLE_EPSILON: f64 = 1e-6;

// Beyond this the fractional part of an f64 coordinate is too coarse for the corner weights.
const COORD_LIMIT: f64 = 1e9;

/// Bilinearly sample `image` at `loc`, with pixel `(col, row)` centred exactly on `(col, row)`.
///
/// The four lattice neighbours are clamped into the image independently, so border pixels are
/// repeated for any coordinate, however far out of range. Always returns four slots; slots past
/// the image's channel count are `0`. An empty image samples as all zeros.
pub fn sample_bilinear(image: &PixelBuffer, loc: Point) -> [u8; 4] {
    let mut out = [0u8; 4];
    if image.is_empty() {
        return out;
    }

    let max_col = f64::from(image.width() - 1);
    let max_row = f64::from(image.height() - 1);

    let x = loc.x.clamp(-COORD_LIMIT, COORD_LIMIT);
    let y = loc.y.clamp(-COORD_LIMIT, COORD_LIMIT);

    let col0 = x.floor();
    let row0 = y.floor();
    let col1 = col0 + 1.0;
    let row1 = row0 + 1.0;

    let w_r0c0 = (col1 - x) * (row1 - y);
    let w_r0c1 = (x - col0) * (row1 - y);
    let w_r1c0 = (col1 - x) * (y - row0);
    let w_r1c1 = (x - col0) * (y - row0);

    let c0 = clamp_index(col0, max_col);
    let c1 = clamp_index(col1, max_col);
    let r0 = clamp_index(row0, max_row);
    let r1 = clamp_index(row1, max_row);

    let p00 = image.pixel(r0, c0);
    let p01 = image.pixel(r0, c1);
    let p10 = image.pixel(r1, c0);
    let p11 = image.pixel(r1, c1);

    for (ch, slot) in out.iter_mut().enumerate().take(image.channels() as usize) {
        let acc = f64::from(p00[ch]) * w_r0c0
            + f64::from(p01[ch]) * w_r0c1
            + f64::from(p10[ch]) * w_r1c0
            + f64::from(p11[ch]) * w_r1c1;
        *slot = to_u8(acc);
    }
    out
}

// NaN clamps to NaN, and `as` saturates NaN to 0.
fn clamp_index(v: f64, max: f64) -> u32 {
    v.clamp(0.0, max) as u32
}

fn to_u8(acc: f64) -> u8 {
    (acc + SAMPLE_EPSILON).floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sample.rs"]
mod tests;
