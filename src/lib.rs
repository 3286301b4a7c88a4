//! metamorph is a feature-based image metamorphosis engine.
//!
//! Given two images and matching pairs of line features drawn on them, it produces the
//! in-between frame at any time `t` in `[0, 1]` (Beier & Neely field morphing).
//!
//! # Pipeline overview
//!
//! 1. **Warp**: each image is inverse-mapped towards the feature geometry at `t`
//!    ([`distort`]). Every destination pixel is pulled through a weighted blend of per-feature
//!    local coordinate transforms and bilinearly resampled ([`sample_bilinear`]).
//! 2. **Dissolve**: the two warped images are cross-faded ([`blend`]).
//! 3. [`morph`] runs both steps; [`morph_with`] can run the warps on a rayon pool.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure**: every call takes its inputs by reference and returns a freshly owned
//!   [`PixelBuffer`]; there is no state between calls.
//! - **Deterministic**: sequential and parallel runs produce identical bytes, and degenerate
//!   input (zero-length features, no features at all) yields a defined image, never NaN.
//! - **No IO in the engine**: decoding and correspondence files live in the helpers re-exported
//!   below and are only used by callers such as the `metamorph` binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod geometry;
mod raster;
mod render;
mod warp;

pub use assets::correspondence::{
    Correspondences, load_correspondences, parse_json, parse_text, to_json, to_text,
    write_correspondences,
};
pub use assets::decode::{decode_image, load_image, save_image};
pub use effects::composite::{blend, blend_px};
pub use foundation::core::{Point, Vec2, perp};
pub use foundation::error::{MorphError, MorphResult};
pub use geometry::segment::{FeaturePair, Segment, SegmentDistance, split_pairs};
pub use raster::buffer::{MAX_CHANNELS, PixelBuffer};
pub use raster::sample::{SAMPLE_EPSILON, sample_bilinear};
pub use render::pipeline::{Threading, distort_with, morph, morph_with};
pub use warp::field::{FieldWarp, WarpParams, distort};
