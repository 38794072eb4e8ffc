use crate::axes::{Axes, GridStyle, Scale, TickFormat};
use crate::error::Result;
use crate::normalize::normalize_line;
use crate::spec::{AxesOptions, LineSeries, XFormat};

use super::{add_labels, add_limits_xy, CAP_SIZE};

/// Tick label format used when `x_format` is `date`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lines and error bars.
///
/// A series that supplied any error key is drawn as an error-bar plot, others as a
/// plain line. Invisible series are normalized but not drawn.
pub fn render_line(series: &[LineSeries], options: &AxesOptions, mut axes: Axes) -> Result<Axes> {
    for line in series.iter().map(normalize_line) {
        if !line.visible {
            continue;
        }
        if line.has_error_bars {
            axes.errorbar(
                &line.x,
                &line.y,
                &line.x_error,
                &line.y_error,
                line.line_style,
                &line.label,
                CAP_SIZE,
            );
        } else {
            axes.plot(&line.x, &line.y, line.line_style, &line.label);
        }
    }

    add_labels(&mut axes, options);
    add_limits_xy(&mut axes, options);
    axes.grid(GridStyle::Dashed);
    if options.x_format == XFormat::Date {
        axes.set_x_tick_format(TickFormat::Date(DATE_FORMAT.to_string()));
    }
    if options.log_x {
        axes.set_xscale(Scale::Log);
    }
    if options.log_y {
        axes.set_yscale(Scale::Log);
    }
    Ok(axes)
}
