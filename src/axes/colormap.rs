//! Colormaps backed by `colorous` gradients.

use super::Rgb;

/// Continuous colormap used for surfaces, contour bands and color bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colormap {
    /// Diverging red-yellow-blue
    #[default]
    RdYlBu,
}

impl Colormap {
    fn gradient(&self) -> colorous::Gradient {
        match self {
            Colormap::RdYlBu => colorous::RED_YELLOW_BLUE,
        }
    }

    /// Color at `t`, clamped to `[0, 1]`
    pub fn eval(&self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let color = self.gradient().eval_continuous(t);
        (color.r, color.g, color.b)
    }

    /// Color of `value` scaled into `[vmin, vmax]`
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Rgb {
        let span = vmax - vmin;
        if span.abs() < f64::EPSILON {
            return self.eval(0.5);
        }
        self.eval((value - vmin) / span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_is_light() {
        // the diverging midpoint is the pale yellow between the two ends
        let (r, g, b) = Colormap::default().eval(0.5);
        assert!(r > 200 && g > 200 && b > 150);
        assert_eq!(Colormap::RdYlBu.map(3.0, 3.0, 3.0), Colormap::RdYlBu.eval(0.5));
    }

    #[test]
    fn test_diverging_ends_differ() {
        let cmap = Colormap::RdYlBu;
        let low = cmap.map(0.0, 0.0, 10.0);
        let high = cmap.map(10.0, 0.0, 10.0);
        // red end has more red than blue, blue end the opposite
        assert!(low.0 > low.2);
        assert!(high.2 > high.0);
        assert_eq!(cmap.map(-5.0, 0.0, 10.0), low);
    }
}
