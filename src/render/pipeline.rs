use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    effects::composite::blend,
    foundation::error::{MorphError, MorphResult},
    geometry::segment::Segment,
    raster::buffer::{PixelBuffer, ensure_same_dims},
    warp::field::{FieldWarp, WarpParams},
};

/// How the CPU work of a call is spread over threads.
///
/// Sequential and parallel runs produce identical bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Threading {
    /// Warp rows in parallel and run both warps of a morph concurrently.
    pub parallel: bool,
    /// Worker count for the dedicated pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// [`crate::distort`] with explicit threading.
pub fn distort_with(
    image: &PixelBuffer,
    start: &[Segment],
    end: &[Segment],
    t: f64,
    params: &WarpParams,
    threading: &Threading,
) -> MorphResult<PixelBuffer> {
    let warp = FieldWarp::new(start, end, t, params)?;
    if !threading.parallel {
        return Ok(warp.render(image));
    }
    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| warp.render_par(image)))
}

/// Morph `img1` into `img2` and return the frame at time `t`.
///
/// Pipeline:
/// 1. warp `img1` from its own features (`seg1`) towards the geometry at `t`
/// 2. warp `img2` from `seg2` towards the same geometry (`1 - t` of the way back to `seg1`)
/// 3. cross-dissolve, `img1` weighted `1 - t`
///
/// At `t = 0` this reproduces `img1`, at `t = 1` it reproduces `img2`.
///
/// # Errors
/// [`MorphError::DimensionMismatch`] when the images differ in size or channel count,
/// [`MorphError::FeatureCountMismatch`] when `seg1` and `seg2` differ in length,
/// [`MorphError::Validation`] for bad `params`.
pub fn morph(
    img1: &PixelBuffer,
    img2: &PixelBuffer,
    seg1: &[Segment],
    seg2: &[Segment],
    t: f64,
    params: &WarpParams,
) -> MorphResult<PixelBuffer> {
    morph_with(img1, img2, seg1, seg2, t, params, &Threading::default())
}

/// [`morph`] with explicit threading.
///
/// With `threading.parallel` both warps run concurrently inside one dedicated pool; the blend
/// starts once both have finished.
#[tracing::instrument(
    skip(img1, img2, seg1, seg2, params, threading),
    fields(width = img1.width(), height = img1.height(), features = seg1.len())
)]
pub fn morph_with(
    img1: &PixelBuffer,
    img2: &PixelBuffer,
    seg1: &[Segment],
    seg2: &[Segment],
    t: f64,
    params: &WarpParams,
    threading: &Threading,
) -> MorphResult<PixelBuffer> {
    ensure_same_dims(img1, img2)?;
    let forward = FieldWarp::new(seg1, seg2, t, params)?;
    let backward = FieldWarp::new(seg2, seg1, 1.0 - t, params)?;

    let (warped1, warped2) = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            rayon::join(|| forward.render_par(img1), || backward.render_par(img2))
        })
    } else {
        (forward.render(img1), backward.render(img2))
    };

    blend(&warped1, &warped2, 1.0 - t)
}

fn build_thread_pool(threads: Option<usize>) -> MorphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MorphError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon thread pool")?)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
