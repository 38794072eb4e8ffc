//! Equal-width binning for histogram artists.

/// Bin edges and bar heights of a histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// `bins + 1` edges
    pub edges: Vec<f64>,
    /// Counts, or densities when normalized
    pub heights: Vec<f64>,
}

/// Split `data` into `bins` equal-width bins spanning its range.
///
/// The last bin is closed on the right. Constant data spans `[v - 0.5, v + 0.5]`.
/// With `density`, heights are `count / (total * width)` so the bars integrate to one.
pub fn compute_bins(data: &[f64], bins: usize, density: bool) -> Bins {
    let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Bins {
            edges: vec![],
            heights: vec![],
        };
    }

    let mut min = finite.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let bin_width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + i as f64 * bin_width).collect();
    let mut counts = vec![0usize; bins];

    for &value in &finite {
        let bin_idx = ((value - min) / bin_width).floor() as usize;
        counts[bin_idx.min(bins - 1)] += 1;
    }

    let total = finite.len() as f64;
    let heights = counts
        .into_iter()
        .map(|count| {
            if density {
                count as f64 / (total * bin_width)
            } else {
                count as f64
            }
        })
        .collect();

    Bins { edges, heights }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let bins = compute_bins(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0], 3, false);
        assert_eq!(bins.edges.len(), 4);
        assert_eq!(bins.heights, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_density_integrates_to_one() {
        let data = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
        let bins = compute_bins(&data, 4, true);
        let width = bins.edges[1] - bins.edges[0];
        let area: f64 = bins.heights.iter().map(|h| h * width).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_data() {
        let bins = compute_bins(&[2.0, 2.0], 2, false);
        assert_eq!(bins.edges.first().copied(), Some(1.5));
        assert_eq!(bins.edges.last().copied(), Some(2.5));
        assert_eq!(bins.heights.iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_bins(&[], 5, false).heights.is_empty());
        assert!(compute_bins(&[1.0], 0, false).edges.is_empty());
    }
}
