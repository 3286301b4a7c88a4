use serde::{Deserialize, Serialize};

use crate::foundation::core::{Point, Vec2, perp};

/// A directed line feature in pixel space (origin top-left, x right, y down).
///
/// Segments may be degenerate (`start == end`). Every query stays finite on a degenerate
/// segment; callers that weight features should skip them via [`Segment::is_degenerate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
}

/// How the distance from a point to a finite segment is measured when the point projects
/// outside the segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentDistance {
    /// Both out-of-range cases (`u < 0` and `u > 1`) measure to `start`.
    ///
    /// This is the historical rule and stays the default so existing correspondence sets
    /// reproduce the same frames.
    #[default]
    StartEndpoint,
    /// Corrected variant: `u > 1` measures to `end`, so the distance is to the nearer endpoint.
    NearestEndpoint,
}

impl Segment {
    /// Build a segment from its endpoints.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Build a segment from raw endpoint coordinates.
    pub fn from_coords(sx: f64, sy: f64, ex: f64, ey: f64) -> Self {
        Self::new(Point::new(sx, sy), Point::new(ex, ey))
    }

    /// Squared length.
    pub fn length2(self) -> f64 {
        self.direction().length_squared()
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.direction().length()
    }

    /// `true` when both endpoints coincide.
    pub fn is_degenerate(self) -> bool {
        self.length2() == 0.0
    }

    /// Unnormalized direction `end - start`.
    pub fn direction(self) -> Vec2 {
        self.end - self.start
    }

    /// Direction rotated 90 degrees counter-clockwise, same magnitude.
    pub fn perp(self) -> Vec2 {
        perp(self.direction())
    }

    /// Projection parameter of `p` on the infinite line through the segment.
    ///
    /// `0` at `start`, `1` at `end`, negative before `start`, above `1` past `end`. A degenerate
    /// segment has no line, so every point maps to `0`.
    pub fn line_parameter(self, p: Point) -> f64 {
        let len2 = self.length2();
        if len2 == 0.0 {
            return 0.0;
        }
        self.direction().dot(p - self.start) / len2
    }

    /// Signed perpendicular distance of `p` from the infinite line, positive on the
    /// [`Segment::perp`] side. `0` for a degenerate segment.
    pub fn signed_line_distance(self, p: Point) -> f64 {
        let len = self.length();
        if len == 0.0 {
            return 0.0;
        }
        (p - self.start).dot(self.perp()) / len
    }

    /// Unsigned distance of `p` from the finite segment, given precomputed
    /// `u = line_parameter(p)` and `v = signed_line_distance(p)`.
    ///
    /// Uses [`SegmentDistance::StartEndpoint`].
    pub fn segment_distance(self, p: Point, u: f64, v: f64) -> f64 {
        self.segment_distance_with(p, u, v, SegmentDistance::StartEndpoint)
    }

    /// Like [`Segment::segment_distance`] with an explicit out-of-range rule.
    pub fn segment_distance_with(self, p: Point, u: f64, v: f64, mode: SegmentDistance) -> f64 {
        if u < 0.0 {
            p.distance(self.start)
        } else if u > 1.0 {
            match mode {
                SegmentDistance::StartEndpoint => p.distance(self.start),
                SegmentDistance::NearestEndpoint => p.distance(self.end),
            }
        } else {
            v.abs()
        }
    }

    /// Endpoint-wise interpolation: `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(self, other: Segment, t: f64) -> Segment {
        Segment::new(self.start.lerp(other.start, t), self.end.lerp(other.end, t))
    }
}

/// One feature marked in both images: `source` in the first image, `target` in the second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeaturePair {
    /// The feature as drawn on the first image.
    pub source: Segment,
    /// The same feature as drawn on the second image.
    pub target: Segment,
}

/// Split pairs into the two index-aligned arrays the warp engine consumes.
pub fn split_pairs(pairs: &[FeaturePair]) -> (Vec<Segment>, Vec<Segment>) {
    pairs.iter().map(|pair| (pair.source, pair.target)).unzip()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/segment.rs"]
mod tests;
