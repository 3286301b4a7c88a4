use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Point, Vec2},
        error::{MorphError, MorphResult},
    },
    geometry::segment::{Segment, SegmentDistance},
    raster::{buffer::PixelBuffer, sample::sample_bilinear},
};

/// Shape parameters of the field warp.
///
/// Feature weight at a pixel is `(length^p / (a + distance))^b`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarpParams {
    /// Anti-singularity offset; keeps weights finite on the feature itself. Must be `> 0`.
    pub a: f64,
    /// Distance falloff exponent. Must be `>= 0`.
    pub b: f64,
    /// Length weighting exponent. Must be `>= 0`.
    pub p: f64,
    /// Out-of-range rule for the pixel-to-feature distance.
    pub distance: SegmentDistance,
}

impl Default for WarpParams {
    fn default() -> Self {
        Self {
            a: 0.5,
            b: 1.0,
            p: 0.2,
            distance: SegmentDistance::StartEndpoint,
        }
    }
}

impl WarpParams {
    /// Reject non-finite or out-of-range shape parameters.
    pub fn validate(&self) -> MorphResult<()> {
        if !(self.a.is_finite() && self.b.is_finite() && self.p.is_finite()) {
            return Err(MorphError::validation("warp params a, b, p must be finite"));
        }
        if self.a <= 0.0 {
            return Err(MorphError::validation("warp param a must be > 0"));
        }
        if self.b < 0.0 {
            return Err(MorphError::validation("warp param b must be >= 0"));
        }
        if self.p < 0.0 {
            return Err(MorphError::validation("warp param p must be >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Feature {
    reference: Segment,
    source: Segment,
    source_len: f64,
    strength: f64,
}

/// Per-call warp state: every feature resolved at time `t`.
///
/// Built once per [`distort`] call and then queried per pixel; it holds no reference to the
/// image, so one `FieldWarp` can be shared across rayon workers.
#[derive(Clone, Debug)]
pub struct FieldWarp {
    features: Vec<Feature>,
    a: f64,
    b: f64,
    distance: SegmentDistance,
    skipped: usize,
}

impl FieldWarp {
    /// Resolve features at time `t`: `start[i]` at `t = 0`, `end[i]` at `t = 1`.
    ///
    /// Features whose source or interpolated segment has zero length carry no weight and are
    /// dropped here.
    pub fn new(
        start: &[Segment],
        end: &[Segment],
        t: f64,
        params: &WarpParams,
    ) -> MorphResult<Self> {
        if start.len() != end.len() {
            return Err(MorphError::FeatureCountMismatch {
                left: start.len(),
                right: end.len(),
            });
        }
        params.validate()?;

        let mut features = Vec::with_capacity(start.len());
        let mut skipped = 0usize;
        for (source, target) in start.iter().zip(end) {
            let reference = source.lerp(*target, t);
            if source.is_degenerate() || reference.is_degenerate() {
                skipped += 1;
                continue;
            }
            features.push(Feature {
                reference,
                source: *source,
                source_len: source.length(),
                strength: reference.length().powf(params.p),
            });
        }
        if skipped > 0 {
            tracing::debug!(skipped, "excluding zero-length features from warp");
        }

        Ok(Self {
            features,
            a: params.a,
            b: params.b,
            distance: params.distance,
            skipped,
        })
    }

    /// Features that take part in the warp.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Features dropped because they were degenerate.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Where destination pixel `x` reads from in the source image.
    ///
    /// Falls back to `x` itself when no feature carries weight there.
    pub fn source_point(&self, x: Point) -> Point {
        let mut displacement = Vec2::ZERO;
        let mut weight_sum = 0.0f64;

        for f in &self.features {
            let u = f.reference.line_parameter(x);
            let v = f.reference.signed_line_distance(x);
            let mapped =
                f.source.start + f.source.direction() * u + f.source.perp() * (v / f.source_len);

            let dist = f
                .reference
                .segment_distance_with(x, u, v, self.distance);
            let weight = (f.strength / (self.a + dist)).powf(self.b);
            if !(weight.is_finite() && weight > 0.0) {
                continue;
            }

            displacement += (mapped - x) * weight;
            weight_sum += weight;
        }

        if !(weight_sum > 0.0 && weight_sum.is_finite()) {
            return x;
        }
        let out = x + displacement / weight_sum;
        if out.is_finite() { out } else { x }
    }

    /// Warp `image` on the calling thread.
    pub fn render(&self, image: &PixelBuffer) -> PixelBuffer {
        if self.features.is_empty() || image.is_empty() {
            return image.clone();
        }
        let mut out = image.zeroed_like();
        let row_len = out.row_len();
        for (row, dst) in out.data_mut().chunks_exact_mut(row_len).enumerate() {
            self.render_row(image, row, dst);
        }
        out
    }

    /// Warp `image` one row per rayon task, in whatever pool is current.
    ///
    /// Produces the same bytes as [`FieldWarp::render`].
    pub fn render_par(&self, image: &PixelBuffer) -> PixelBuffer {
        if self.features.is_empty() || image.is_empty() {
            return image.clone();
        }
        let mut out = image.zeroed_like();
        let row_len = out.row_len();
        out.data_mut()
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(row, dst)| self.render_row(image, row, dst));
        out
    }

    fn render_row(&self, image: &PixelBuffer, row: usize, dst: &mut [u8]) {
        let n = image.channels() as usize;
        let y = row as f64;
        for (col, px) in dst.chunks_exact_mut(n).enumerate() {
            let src = self.source_point(Point::new(col as f64, y));
            let sample = sample_bilinear(image, src);
            px.copy_from_slice(&sample[..n]);
        }
    }
}

/// Warp `image` towards the feature geometry at time `t`.
///
/// `start` describes features as they sit in `image`; `end` is where they go at `t = 1`. Every
/// destination pixel is inverse-mapped through the weighted feature transforms and bilinearly
/// resampled. The result has the same dimensions as `image`.
///
/// # Errors
/// [`MorphError::FeatureCountMismatch`] if the arrays differ in length,
/// [`MorphError::Validation`] for bad `params`.
#[tracing::instrument(
    skip(image, start, end, params),
    fields(width = image.width(), height = image.height(), features = start.len())
)]
pub fn distort(
    image: &PixelBuffer,
    start: &[Segment],
    end: &[Segment],
    t: f64,
    params: &WarpParams,
) -> MorphResult<PixelBuffer> {
    let warp = FieldWarp::new(start, end, t, params)?;
    Ok(warp.render(image))
}

#[cfg(test)]
#[path = "../../tests/unit/warp/field.rs"]
mod tests;
