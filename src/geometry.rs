//! Radar chart geometry: polygon vertices, label anchors and data points.
//!
//! Angles start at −π/2 so the first vertex points straight up. Canvas y
//! grows downward, which makes increasing angles run clockwise on screen.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Center and outer radius of a radar chart, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarAnchor {
    pub center: Point,
    pub radius: f64,
}

impl RadarAnchor {
    pub const fn new(center: Point, radius: f64) -> Self {
        RadarAnchor { center, radius }
    }

    pub fn vertices(&self, n: usize) -> Vec<Point> {
        polygon_vertices(self.center, self.radius, n)
    }

    pub fn label_anchors(&self, n: usize, offset: f64) -> Vec<Point> {
        label_anchors(self.center, self.radius, n, offset)
    }
}

/// Angle of spoke `i` out of `n`.
#[inline]
pub fn spoke_angle(i: usize, n: usize) -> f64 {
    -FRAC_PI_2 + i as f64 * (TAU / n as f64)
}

#[inline]
fn point_on_spoke(center: Point, distance: f64, i: usize, n: usize) -> Point {
    let angle = spoke_angle(i, n);
    Point::new(
        center.x + distance * angle.cos(),
        center.y + distance * angle.sin(),
    )
}

/// The `n` vertices of a regular polygon, top first, clockwise.
pub fn polygon_vertices(center: Point, radius: f64, n: usize) -> Vec<Point> {
    (0..n).map(|i| point_on_spoke(center, radius, i, n)).collect()
}

/// Text positions `offset` pixels beyond each vertex.
pub fn label_anchors(center: Point, radius: f64, n: usize, offset: f64) -> Vec<Point> {
    polygon_vertices(center, radius + offset, n)
}

/// Points of the data polygon: each value is placed on its spoke at
/// `radius * value / scale_max`. Negative values collapse to the center.
pub fn value_points(anchor: &RadarAnchor, values: &[f64], scale_max: f64) -> Vec<Point> {
    let n = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let ratio = if scale_max > 0.0 { (v / scale_max).max(0.0) } else { 0.0 };
            point_on_spoke(anchor.center, anchor.radius * ratio, i, n)
        })
        .collect()
}

/// Default anchor for a `width` x `height` surface: centered, with the radius
/// shrunk by `padding` on each side. Radius never goes negative.
pub fn anchor_for_area(width: f64, height: f64, padding: f64) -> RadarAnchor {
    let radius = (width.min(height) / 2.0 - padding).max(0.0);
    RadarAnchor::new(Point::new(width / 2.0, height / 2.0), radius)
}

/// Smallest whole number that fits every value, at least 1.
pub fn auto_scale_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max)
        .ceil()
        .max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    const ORIGIN: Point = Point::new(0.0, 0.0);

    #[test]
    fn first_vertex_points_up() {
        let v = polygon_vertices(ORIGIN, 10.0, 5);
        assert_eq!(v.len(), 5);
        assert_abs_diff_eq!(v[0].x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[0].y, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn pentagon_vertices_are_72_degrees_apart_clockwise() {
        let v = polygon_vertices(ORIGIN, 10.0, 5);
        for i in 0..5 {
            let a = v[i].y.atan2(v[i].x);
            let b = v[(i + 1) % 5].y.atan2(v[(i + 1) % 5].x);
            let step = (b - a).rem_euclid(TAU);
            assert_abs_diff_eq!(step.to_degrees(), 72.0, epsilon = 1e-9);
        }
        // second vertex is to the right of the top one: clockwise on screen
        assert!(v[1].x > 0.0);
        assert!(v[1].y < 0.0);
    }

    #[test]
    fn vertices_are_distinct_and_equidistant() {
        let center = Point::new(40.0, -7.5);
        for n in 3..=12 {
            let v = polygon_vertices(center, 25.0, n);
            assert_eq!(v.len(), n);
            for (i, p) in v.iter().enumerate() {
                assert_abs_diff_eq!(p.distance_to(center), 25.0, epsilon = 1e-9);
                for q in &v[i + 1..] {
                    assert!(p.distance_to(*q) > 1e-6, "n={} has duplicate vertices", n);
                }
            }
        }
    }

    #[test]
    fn label_anchors_sit_offset_beyond_vertices() {
        let center = Point::new(150.0, 150.0);
        let anchors = label_anchors(center, 100.0, 5, 30.0);
        let vertices = polygon_vertices(center, 100.0, 5);
        for (a, v) in anchors.iter().zip(&vertices) {
            assert_abs_diff_eq!(a.distance_to(center), 130.0, epsilon = 1e-9);
            assert_abs_diff_eq!(a.distance_to(*v), 30.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn value_points_scale_along_spokes() {
        let anchor = RadarAnchor::new(ORIGIN, 100.0);
        let pts = value_points(&anchor, &[10.0, 5.0, 0.0, -3.0, 20.0], 10.0);
        assert_abs_diff_eq!(pts[0].y, -100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1].distance_to(ORIGIN), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[2].distance_to(ORIGIN), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[3].distance_to(ORIGIN), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pts[4].distance_to(ORIGIN), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn area_anchor_is_centered_and_padded() {
        let anchor = anchor_for_area(300.0, 200.0, 40.0);
        assert_eq!(anchor.center, Point::new(150.0, 100.0));
        assert_abs_diff_eq!(anchor.radius, 60.0);
        assert_abs_diff_eq!(anchor_for_area(20.0, 20.0, 40.0).radius, 0.0);
    }

    #[test]
    fn auto_scale_rounds_up_to_whole_numbers() {
        assert_abs_diff_eq!(auto_scale_max(&[12.0, 8.0, 4.0, 10.0, 6.0]), 12.0);
        assert_abs_diff_eq!(auto_scale_max(&[3.2, 1.0]), 4.0);
        assert_abs_diff_eq!(auto_scale_max(&[0.0, -5.0]), 1.0);
    }
}
