use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MorphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(MorphError::parse("x").to_string().contains("parse error:"));
}

#[test]
fn mismatch_variants_name_both_sides() {
    let err = MorphError::FeatureCountMismatch { left: 3, right: 2 };
    assert_eq!(err.to_string(), "feature count mismatch: 3 vs 2 segments");

    let err = MorphError::DimensionMismatch {
        left: (4, 2, 4),
        right: (4, 3, 4),
    };
    assert_eq!(err.to_string(), "dimension mismatch: 4x2x4 vs 4x3x4");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
