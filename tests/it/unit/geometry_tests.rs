//! Unit tests for geometry module.

use crate::helpers::p;
use chartmark::geometry::{
    HitTolerance, distance_to_segment, line_y_at, near_point, near_segment, point_in_quad,
    signed_offset, slope, y_intercept,
};

#[test]
fn test_slope_and_intercept() {
    let m = slope(p(0.0, 1.0), p(2.0, 5.0)).unwrap();
    assert_eq!(m, 2.0);
    assert_eq!(y_intercept(m, p(2.0, 5.0)), 1.0);
    assert_eq!(line_y_at(p(0.0, 1.0), p(2.0, 5.0), 3.0), Some(7.0));
}

#[test]
fn test_vertical_line_has_no_slope() {
    assert!(slope(p(3.0, 0.0), p(3.0, 10.0)).is_none());
    assert!(signed_offset(p(3.0, 0.0), p(3.0, 10.0), p(5.0, 5.0)).is_none());
}

#[test]
fn test_signed_offset_is_negative_below_the_line() {
    // Line y = x; (10, 5) sits 5 below it
    assert_eq!(signed_offset(p(0.0, 0.0), p(10.0, 10.0), p(10.0, 5.0)), Some(-5.0));
    assert_eq!(signed_offset(p(0.0, 0.0), p(10.0, 10.0), p(4.0, 7.0)), Some(3.0));
}

#[test]
fn test_distance_to_segment_clamps_to_endpoints() {
    let (a, b) = (p(0.0, 0.0), p(10.0, 0.0));
    assert_eq!(distance_to_segment(p(5.0, 3.0), a, b), 3.0);
    assert_eq!(distance_to_segment(p(13.0, 4.0), a, b), 5.0);
    // Zero-length segment behaves like a point
    assert_eq!(distance_to_segment(p(3.0, 4.0), a, a), 5.0);
}

#[test]
fn test_anisotropic_tolerance() {
    // One x unit is as wide as ten y units
    let tol = HitTolerance::new(1.0, 10.0);
    assert!(near_point(p(0.5, 8.0), p(0.0, 0.0), tol));
    assert!(!near_point(p(2.0, 0.0), p(0.0, 0.0), tol));
    assert!(near_segment(p(5.0, 9.0), p(0.0, 0.0), p(10.0, 0.0), tol));
    assert!(!near_segment(p(5.0, 11.0), p(0.0, 0.0), p(10.0, 0.0), tol));
}

#[test]
fn test_point_in_quad_either_winding() {
    let ccw = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
    let cw = [p(0.0, 0.0), p(0.0, 10.0), p(10.0, 10.0), p(10.0, 0.0)];
    for quad in [ccw, cw] {
        assert!(point_in_quad(p(5.0, 5.0), &quad));
        assert!(!point_in_quad(p(15.0, 5.0), &quad));
    }
}

#[test]
fn test_point_in_sheared_quad() {
    // Channel along y = x with offset 4
    let quad = [p(0.0, 0.0), p(10.0, 10.0), p(10.0, 14.0), p(0.0, 4.0)];
    assert!(point_in_quad(p(5.0, 7.0), &quad));
    assert!(!point_in_quad(p(5.0, 3.0), &quad));
    assert!(!point_in_quad(p(5.0, 10.0), &quad));
}

#[test]
fn test_degenerate_quad_contains_nothing() {
    let flat = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 0.0), p(0.0, 0.0)];
    assert!(!point_in_quad(p(5.0, 0.0), &flat));
}
