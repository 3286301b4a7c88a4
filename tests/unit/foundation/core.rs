use super::*;

#[test]
fn perp_is_ccw_quarter_turn() {
    assert_eq!(perp(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0));
    assert_eq!(perp(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
}

#[test]
fn perp_keeps_length_and_is_orthogonal() {
    let v = Vec2::new(3.0, -4.0);
    let p = perp(v);
    assert_eq!(p.length(), 5.0);
    assert_eq!(p.dot(v), 0.0);
}

#[test]
fn perp_of_zero_is_zero() {
    assert_eq!(perp(Vec2::ZERO), Vec2::ZERO);
}
