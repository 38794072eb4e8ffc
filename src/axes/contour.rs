//! Geometry of filled contours over a triangulation.
//!
//! Each triangle is clipped against every band `[levels[k], levels[k + 1]]` with z
//! interpolated linearly along its edges, so band boundaries are the piecewise-linear
//! iso-lines of the triangulated field.

/// Vertex with its field value
pub type Vertex = (f64, f64, f64);

/// Keep the part of a convex polygon where `inside` holds, interpolating on `level`
fn clip(polygon: &[Vertex], level: f64, keep_above: bool) -> Vec<Vertex> {
    let inside = |v: &Vertex| if keep_above { v.2 >= level } else { v.2 <= level };
    let mut out = Vec::with_capacity(polygon.len() + 2);
    for (i, current) in polygon.iter().enumerate() {
        let previous = &polygon[(i + polygon.len() - 1) % polygon.len()];
        match (inside(previous), inside(current)) {
            (true, true) => out.push(*current),
            (true, false) => out.push(crossing(previous, current, level)),
            (false, true) => {
                out.push(crossing(previous, current, level));
                out.push(*current);
            }
            (false, false) => {}
        }
    }
    out
}

fn crossing(a: &Vertex, b: &Vertex, level: f64) -> Vertex {
    let dz = b.2 - a.2;
    let t = if dz.abs() < f64::EPSILON { 0.5 } else { (level - a.2) / dz };
    (a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1), level)
}

/// Part of a triangle whose values lie in `[lo, hi]`; empty when none does
pub fn clip_band(triangle: &[Vertex; 3], lo: f64, hi: f64) -> Vec<(f64, f64)> {
    let above = clip(triangle, lo, true);
    if above.len() < 3 {
        return Vec::new();
    }
    let band = clip(&above, hi, false);
    if band.len() < 3 {
        return Vec::new();
    }
    band.into_iter().map(|(x, y, _)| (x, y)).collect()
}

/// Every band polygon of a filled contour, tagged with its band index.
///
/// Values below the first level fall into band 0 and values above the last one into
/// the top band.
pub fn band_polygons(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    triangles: &[[usize; 3]],
    levels: &[f64],
) -> Vec<(usize, Vec<(f64, f64)>)> {
    if levels.len() < 2 {
        return Vec::new();
    }
    let bands = levels.len() - 1;
    let mut polygons = Vec::new();
    for t in triangles {
        let Some(triangle) = vertices(x, y, z, t) else {
            continue;
        };
        for k in 0..bands {
            let lo = if k == 0 { f64::NEG_INFINITY } else { levels[k] };
            let hi = if k == bands - 1 { f64::INFINITY } else { levels[k + 1] };
            let polygon = clip_band(&triangle, lo, hi);
            if !polygon.is_empty() {
                polygons.push((k, polygon));
            }
        }
    }
    polygons
}

fn vertices(x: &[f64], y: &[f64], z: &[f64], t: &[usize; 3]) -> Option<[Vertex; 3]> {
    let vertex = |i: usize| -> Option<Vertex> {
        let v = (*x.get(i)?, *y.get(i)?, *z.get(i)?);
        (v.0.is_finite() && v.1.is_finite() && v.2.is_finite()).then_some(v)
    };
    Some([vertex(t[0])?, vertex(t[1])?, vertex(t[2])?])
}

/// Linearly interpolated value at `(px, py)`, if a triangle contains the point
pub fn interpolate(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    triangles: &[[usize; 3]],
    px: f64,
    py: f64,
) -> Option<f64> {
    triangles.iter().find_map(|t| {
        let [a, b, c] = vertices(x, y, z, t)?;
        let det = (b.1 - c.1) * (a.0 - c.0) + (c.0 - b.0) * (a.1 - c.1);
        if det.abs() < f64::EPSILON {
            return None;
        }
        let l1 = ((b.1 - c.1) * (px - c.0) + (c.0 - b.0) * (py - c.1)) / det;
        let l2 = ((c.1 - a.1) * (px - c.0) + (a.0 - c.0) * (py - c.1)) / det;
        let l3 = 1.0 - l1 - l2;
        let eps = -1e-9;
        (l1 >= eps && l2 >= eps && l3 >= eps).then(|| l1 * a.2 + l2 * b.2 + l3 * c.2)
    })
}

/// Band of `value` among `levels`, clamped to the outer bands
pub fn band_index(value: f64, levels: &[f64]) -> usize {
    let bands = levels.len().saturating_sub(1);
    if bands == 0 {
        return 0;
    }
    levels[1..bands]
        .iter()
        .take_while(|&&level| value >= level)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(polygon: &[(f64, f64)]) -> f64 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let (x0, y0) = polygon[i];
                let (x1, y1) = polygon[(i + 1) % n];
                x0 * y1 - x1 * y0
            })
            .sum::<f64>()
            .abs()
            / 2.0
    }

    #[test]
    fn test_bands_cover_triangle() {
        let x = [0.0, 1.0, 0.0];
        let y = [0.0, 0.0, 1.0];
        let z = [0.0, 1.0, 2.0];
        let levels = [0.0, 0.5, 1.0, 1.5, 2.0];
        let polygons = band_polygons(&x, &y, &z, &[[0, 1, 2]], &levels);
        let total: f64 = polygons.iter().map(|(_, p)| area(p)).sum();
        assert!((total - 0.5).abs() < 1e-12);
        assert!(polygons.iter().any(|(k, _)| *k == 3));
    }

    #[test]
    fn test_band_outside_range_is_empty() {
        let triangle = [(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)];
        assert!(clip_band(&triangle, 1.0, 2.0).is_empty());
        assert_eq!(clip_band(&triangle, -1.0, 1.0).len(), 3);
    }

    #[test]
    fn test_interpolate_inside_and_outside() {
        let x = [0.0, 1.0, 0.0];
        let y = [0.0, 0.0, 1.0];
        let z = [0.0, 1.0, 2.0];
        let value = interpolate(&x, &y, &z, &[[0, 1, 2]], 0.25, 0.25).unwrap();
        assert!((value - 0.75).abs() < 1e-12);
        assert!(interpolate(&x, &y, &z, &[[0, 1, 2]], 2.0, 2.0).is_none());
    }

    #[test]
    fn test_band_index_clamps() {
        let levels = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(band_index(-5.0, &levels), 0);
        assert_eq!(band_index(1.5, &levels), 1);
        assert_eq!(band_index(9.0, &levels), 2);
    }
}
