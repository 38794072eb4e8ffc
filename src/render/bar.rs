use crate::axes::{Axes, GridStyle};
use crate::error::Result;
use crate::normalize::normalize_bar;
use crate::spec::{AxesOptions, BarSeries};

use super::{add_labels, CAP_SIZE};

/// Free space between category groups, as a fraction of one category
pub const BAR_GAP: f64 = 0.2;

/// Width of one bar when `series` bars share a category: `n * width + gap = 1`
pub fn bar_width(series: usize) -> f64 {
    (1.0 - BAR_GAP) / series.max(1) as f64
}

/// Tick position of every category, `0.5 * (2 * i - width + 1 - gap)`
pub fn bar_tick_positions(categories: usize, width: f64) -> Vec<f64> {
    (0..categories)
        .map(|i| 0.5 * (2.0 * i as f64 - width + 1.0 - BAR_GAP))
        .collect()
}

/// Grouped bars. Category labels come from the first series.
pub fn render_bar(series: &[BarSeries], options: &AxesOptions, mut axes: Axes) -> Result<Axes> {
    let width = bar_width(series.len());
    let bars: Vec<_> = series.iter().map(normalize_bar).collect();

    for (k, bar) in bars.iter().enumerate() {
        let offset = k as f64 * width;
        let positions: Vec<f64> = (0..bar.x.len()).map(|i| i as f64 + offset).collect();
        axes.bar(&positions, &bar.x, width, &bar.y_error, CAP_SIZE, &bar.label);
    }

    if let Some(first) = bars.first() {
        let ticks = bar_tick_positions(first.labels.len(), width);
        axes.set_xticks(&ticks, &first.labels);
    }

    add_labels(&mut axes, options);
    if let Some(range) = options.range_y {
        axes.set_ylim(range);
    }
    axes.grid(GridStyle::Solid);
    Ok(axes)
}
