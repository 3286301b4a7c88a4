//! Correspondence files: which line in image 1 matches which line in image 2.
//!
//! Two layouts are understood:
//!
//! - **Text** (the historical `.txt` layout): the first line holds the number of pairs `N`;
//!   each following line holds eight reals `asx asy aex aey bsx bsy bex bey`, the feature in
//!   image 1 followed by the same feature in image 2. Lines after the `N`th pair are ignored.
//! - **JSON** (`.json`): `{"pairs": [{"source": {"start": {"x": .., "y": ..}, "end": ..},
//!   "target": ..}, ..]}`.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{MorphError, MorphResult},
    geometry::segment::{FeaturePair, Segment, split_pairs},
};

/// Matched feature lines for a pair of images.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Correspondences {
    /// One entry per feature, in authoring order.
    pub pairs: Vec<FeaturePair>,
}

impl Correspondences {
    /// Number of feature pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when no features are defined.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Index-aligned `(image 1 segments, image 2 segments)`.
    pub fn split(&self) -> (Vec<Segment>, Vec<Segment>) {
        split_pairs(&self.pairs)
    }
}

/// Parse the text layout.
pub fn parse_text(text: &str) -> MorphResult<Correspondences> {
    let mut lines = text.lines().enumerate();

    let (_, header) = lines
        .next()
        .ok_or_else(|| MorphError::parse("correspondence file is empty"))?;
    let count: usize = header
        .split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or_else(|| MorphError::parse("could not read number of segments on line 1"))?;

    let mut pairs = Vec::with_capacity(count.min(4096));
    for (idx, line) in lines {
        if pairs.len() == count {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let v = parse_reals::<8>(line).ok_or_else(|| {
            MorphError::parse(format!(
                "could not read segment pair {} on line {}",
                pairs.len(),
                idx + 1
            ))
        })?;
        pairs.push(FeaturePair {
            source: Segment::from_coords(v[0], v[1], v[2], v[3]),
            target: Segment::from_coords(v[4], v[5], v[6], v[7]),
        });
    }

    if pairs.len() != count {
        return Err(MorphError::parse(format!(
            "expected {count} segment pairs, found {}",
            pairs.len()
        )));
    }
    Ok(Correspondences { pairs })
}

/// Parse the JSON layout.
pub fn parse_json(text: &str) -> MorphResult<Correspondences> {
    serde_json::from_str(text).map_err(|e| MorphError::parse(format!("correspondence JSON: {e}")))
}

/// Render in the text layout.
pub fn to_text(corr: &Correspondences) -> String {
    let mut out = format!("{}\n", corr.len());
    for pair in &corr.pairs {
        let (a, b) = (pair.source, pair.target);
        out.push_str(&format!(
            "{} {} {} {} {} {} {} {}\n",
            a.start.x, a.start.y, a.end.x, a.end.y, b.start.x, b.start.y, b.end.x, b.end.y
        ));
    }
    out
}

/// Render in the JSON layout.
pub fn to_json(corr: &Correspondences) -> MorphResult<String> {
    serde_json::to_string_pretty(corr)
        .map_err(|e| MorphError::parse(format!("serialize correspondences: {e}")))
}

/// Read a correspondence file; `.json` selects the JSON layout, anything else the text layout.
#[tracing::instrument(fields(path = %path.display()), skip(path))]
pub fn load_correspondences(path: &Path) -> MorphResult<Correspondences> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open correspondence file '{}'", path.display()))?;
    let corr = if is_json(path) {
        parse_json(&text)?
    } else {
        parse_text(&text)?
    };
    tracing::debug!(pairs = corr.len(), "read correspondences");
    Ok(corr)
}

/// Write a correspondence file, choosing the layout from the extension like
/// [`load_correspondences`].
pub fn write_correspondences(corr: &Correspondences, path: &Path) -> MorphResult<()> {
    let text = if is_json(path) {
        to_json(corr)?
    } else {
        to_text(corr)
    };
    std::fs::write(path, text)
        .with_context(|| format!("write correspondence file '{}'", path.display()))?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn parse_reals<const N: usize>(line: &str) -> Option<[f64; N]> {
    let mut out = [0.0f64; N];
    let mut toks = line.split_whitespace();
    for slot in &mut out {
        *slot = toks.next()?.parse().ok()?;
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/correspondence.rs"]
mod tests;
