use crate::axes::{span, Axes, Colormap, Range};
use crate::error::{Error, Result};
use crate::normalize::normalize_contour;
use crate::spec::{AxesOptions, ContourSeries};

use super::{add_labels, add_limits_xy};

/// Color bounds of a contour map: `range_z` if given, the data range of `z` otherwise
pub fn color_bounds(z: &[f64], range_z: Option<Range>) -> Result<Range> {
    if z.is_empty() {
        return Err(Error::InvalidValue(
            "contour map needs at least one z value".to_string(),
        ));
    }
    match range_z {
        Some(range) => Ok(range),
        None => span(z.iter().copied(), false).ok_or_else(|| {
            Error::InvalidValue("contour map has no finite z value".to_string())
        }),
    }
}

/// Filled contour with a color bar captioned by the z label
pub fn render_contour(series: &ContourSeries, options: &AxesOptions, mut axes: Axes) -> Result<Axes> {
    let contour = normalize_contour(series);
    let (vmin, vmax) = color_bounds(&contour.z, options.range_z)?;

    axes.tricontourf(
        &contour.x,
        &contour.y,
        &contour.z,
        options.interpolation_samples,
        Colormap::RdYlBu,
        vmin,
        vmax,
    );

    add_labels(&mut axes, options);
    add_limits_xy(&mut axes, options);
    axes.colorbar(&options.z_label)?;
    Ok(axes)
}
