use crate::axes::{Axes, GridStyle};
use crate::error::Result;
use crate::normalize::normalize_hist;
use crate::spec::{AxesOptions, HistSeries};

use super::{add_labels, add_limits_xy};

pub fn render_hist(series: &[HistSeries], options: &AxesOptions, mut axes: Axes) -> Result<Axes> {
    for hist in series.iter().map(normalize_hist) {
        axes.hist(&hist.x, hist.bins, hist.density, hist.alpha, &hist.label);
    }

    add_labels(&mut axes, options);
    add_limits_xy(&mut axes, options);
    axes.grid(GridStyle::Solid);
    Ok(axes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Artist;

    #[test]
    fn test_hist_artist() {
        let series = vec![HistSeries::new(vec![1.0, 2.0, 2.0, 3.0], 3).with_alpha(0.5)];
        let axes = render_hist(&series, &AxesOptions::default(), Axes::new_2d()).unwrap();
        match &axes.artists()[0] {
            Artist::Histogram { bins, alpha, label } => {
                assert_eq!(bins.heights, vec![1.0, 2.0, 1.0]);
                assert_eq!(*alpha, 0.5);
                assert_eq!(label, "no_label");
            }
            other => panic!("unexpected artist {:?}", other),
        }
        assert_eq!(axes.grid_style(), Some(GridStyle::Solid));
    }
}
