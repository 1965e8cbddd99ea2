//! Point-in-polygon on raw latitude/longitude.
//!
//! Vertices are treated as a closed ring in the plane (x = longitude,
//! y = latitude). Points on an edge or vertex count as inside.

use crate::coordinate::Coordinate;

/// Tolerance in degrees for the on-edge test
const EDGE_EPSILON: f64 = 1e-9;

/// Returns whether `point` lies inside or on the boundary of `vertices`.
///
/// Fewer than three vertices never contain anything.
pub fn contains(vertices: &[Coordinate], point: &Coordinate) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let (px, py) = (point.longitude(), point.latitude());
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].longitude(), vertices[i].latitude());
        let (xj, yj) = (vertices[j].longitude(), vertices[j].latitude());

        if on_segment((xi, yi), (xj, yj), (px, py)) {
            return true;
        }

        if (yi > py) != (yj > py) {
            let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
            if px < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

fn on_segment(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    p.0 >= a.0.min(b.0) - EDGE_EPSILON
        && p.0 <= a.0.max(b.0) + EDGE_EPSILON
        && p.1 >= a.1.min(b.1) - EDGE_EPSILON
        && p.1 <= a.1.max(b.1) + EDGE_EPSILON
}
