// Convergence geometry.
//
// Every edge of a compound group is drawn as a bezier whose control point is
// expressed in the edge's own frame: `weight` along the source->target line,
// `distance` along its left-hand normal. Aiming all control points at one
// shared convergence point makes the curves bundle before fanning out.

use serde::Serialize;

use crate::graph::Point;

/// Control point of one edge, relative to its source->target line.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CurveParams {
    /// Position along the line, always in [0, 1].
    pub weight: f64,
    /// Signed offset perpendicular to the line. Unbounded.
    pub distance: f64,
}

/// Arithmetic mean of the points, or None for an empty slice.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::ORIGIN, |acc, &p| acc + p);
    let n = points.len() as f64;
    Some(Point::new(sum.x / n, sum.y / n))
}

/// Point `ratio` of the way from the target toward the centroid of the sources.
pub fn convergence_point(target: Point, sources: &[Point], ratio: f64) -> Option<Point> {
    let c = centroid(sources)?;
    Some(target + (c - target) * ratio)
}

/// Project `convergence` into the frame of the source->target line.
///
/// A zero-length edge has no frame; it gets `fallback` instead. So does any
/// edge whose params come out non-finite.
pub fn curve_params(source: Point, target: Point, convergence: Point, fallback: CurveParams) -> CurveParams {
    let d = target - source;
    let len = d.length();
    if len == 0.0 || !len.is_finite() {
        return fallback;
    }

    // Work in units of the edge length so huge coordinates cannot overflow
    let inv = 1.0 / len;
    let dir = d * inv;
    let weight = ((convergence - source) * inv).dot(dir).clamp(0.0, 1.0);
    let on_line = source.lerp(target, weight);
    let distance = (convergence - on_line).dot(dir.perp());

    if !weight.is_finite() || !distance.is_finite() {
        return fallback;
    }
    CurveParams { weight, distance }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEUTRAL: CurveParams = CurveParams { weight: 0.5, distance: 0.0 };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_centroid() {
        let c = centroid(&[Point::new(0.0, 0.0), Point::new(0.0, 200.0)]).unwrap();
        assert_eq!(c, Point::new(0.0, 100.0));
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_two_source_convergence() {
        let target = Point::new(100.0, 100.0);
        let sources = [Point::new(0.0, 0.0), Point::new(0.0, 200.0)];
        let conv = convergence_point(target, &sources, 0.7).unwrap();
        assert!(close(conv.x, 30.0));
        assert!(close(conv.y, 100.0));

        let upper = curve_params(sources[0], target, conv, NEUTRAL);
        assert!(close(upper.weight, 0.65));
        assert!(close(upper.distance, 35.0 * 2.0_f64.sqrt()));

        // Mirror image: same weight, opposite side of its line
        let lower = curve_params(sources[1], target, conv, NEUTRAL);
        assert!(close(lower.weight, 0.65));
        assert!(close(lower.distance, -35.0 * 2.0_f64.sqrt()));
    }

    #[test]
    fn test_zero_length_edge_is_neutral() {
        let p = Point::new(42.0, -7.0);
        let out = curve_params(p, p, Point::new(1000.0, 1000.0), NEUTRAL);
        assert_eq!(out, CurveParams { weight: 0.5, distance: 0.0 });
    }

    #[test]
    fn test_weight_clamped_beyond_target() {
        // Convergence point past the target end of the line
        let out = curve_params(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(50.0, 5.0), NEUTRAL);
        assert_eq!(out.weight, 1.0);
        assert!(close(out.distance, 5.0 - 0.0));
    }

    #[test]
    fn test_weight_clamped_behind_source() {
        let out = curve_params(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(-30.0, -4.0), NEUTRAL);
        assert_eq!(out.weight, 0.0);
        assert!(close(out.distance, -4.0));
    }

    #[test]
    fn test_distance_unclamped() {
        let out = curve_params(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 1e6), NEUTRAL);
        assert!(close(out.weight, 0.5));
        assert!(close(out.distance, 1e6));
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let target = Point::new(1e200, 0.0);
        let sources = [Point::new(0.0, 0.0), Point::new(0.0, 1e200)];
        let conv = convergence_point(target, &sources, 0.7).unwrap();

        let flat = curve_params(sources[0], target, conv, NEUTRAL);
        assert!(close(flat.weight, 0.3));
        assert!(((flat.distance - 3.5e199) / 3.5e199).abs() < 1e-9);

        let slanted = curve_params(sources[1], target, conv, NEUTRAL);
        assert!((0.0..=1.0).contains(&slanted.weight));
        assert!(close(slanted.weight, 0.475));
        assert!(slanted.distance.is_finite());
    }

    #[test]
    fn test_overflowing_edge_falls_back() {
        // The edge vector itself overflows to infinity
        let out = curve_params(Point::new(-1e308, 0.0), Point::new(1e308, 0.0), Point::ORIGIN, NEUTRAL);
        assert_eq!(out, NEUTRAL);
    }

    #[test]
    fn test_weight_bound_over_grid() {
        let target = Point::new(3.0, -2.0);
        for sx in -5..=5 {
            for sy in -5..=5 {
                let source = Point::new(sx as f64 * 17.0, sy as f64 * 11.0);
                for (cx, cy) in [(-100.0, 0.0), (0.0, 0.0), (50.0, 80.0), (1e4, -1e4)] {
                    let out = curve_params(source, target, Point::new(cx, cy), NEUTRAL);
                    assert!((0.0..=1.0).contains(&out.weight));
                    assert!(out.distance.is_finite());
                }
            }
        }
    }
}
