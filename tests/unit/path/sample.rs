use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[test]
fn endpoints_are_exact() {
    let (a, b, c, d) = (p(0.1, 0.7), p(3.3, -2.9), p(7.77, 1.01), p(-4.2, 9.9));
    assert_eq!(line_point(a, d, 0.0), a);
    assert_eq!(line_point(a, d, 1.0), d);
    assert_eq!(quad_point(a, b, c, 0.0), a);
    assert_eq!(quad_point(a, b, c, 1.0), c);
    assert_eq!(cubic_point(a, b, c, d, 0.0), a);
    assert_eq!(cubic_point(a, b, c, d, 1.0), d);
}

#[test]
fn midpoints_match_bernstein_form() {
    let q = quad_point(p(0.0, 0.0), p(1.0, 2.0), p(2.0, 0.0), 0.5);
    assert!((q.x - 1.0).abs() < 1e-12);
    assert!((q.y - 1.0).abs() < 1e-12);

    let c = cubic_point(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0), 0.5);
    assert!((c.x - 0.5).abs() < 1e-12);
    assert!((c.y - 0.75).abs() < 1e-12);
}

#[test]
fn tangents_are_unit_and_fall_back_on_degenerate_input() {
    let t = line_tangent(p(0.0, 0.0), p(3.0, 4.0));
    assert!((t.x - 0.6).abs() < 1e-12 && (t.y - 0.8).abs() < 1e-12);

    assert_eq!(line_tangent(p(2.0, 2.0), p(2.0, 2.0)), Vec2::new(1.0, 0.0));
    assert_eq!(
        quad_tangent(p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0), 0.3),
        Vec2::new(1.0, 0.0)
    );
    assert_eq!(
        cubic_tangent(p(5.0, 5.0), p(5.0, 5.0), p(5.0, 5.0), p(5.0, 5.0), 0.5),
        Vec2::new(1.0, 0.0)
    );

    let ct = cubic_tangent(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0), 0.5);
    assert!((ct.hypot() - 1.0).abs() < 1e-12);
    assert!((ct.x - 1.0).abs() < 1e-12);
}

#[test]
fn quad_tangent_at_start_follows_first_leg() {
    let t = quad_tangent(p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), 0.0);
    assert!((t.x - 0.0).abs() < 1e-12);
    assert!((t.y - 1.0).abs() < 1e-12);
}

#[test]
fn normal_is_left_hand_rotation() {
    assert_eq!(normal(Vec2::new(1.0, 0.0)), Vec2::new(-0.0, 1.0));
    assert_eq!(normal(Vec2::new(0.0, 1.0)), Vec2::new(-1.0, 0.0));
}
