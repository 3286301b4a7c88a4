pub use kurbo::{Point, Vec2};

/// Rotate `v` by 90 degrees counter-clockwise, keeping its magnitude.
///
/// In pixel space (y down) this turns a segment direction towards the side the signed line
/// distance treats as positive.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
