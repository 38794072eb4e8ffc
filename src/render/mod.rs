//! Axis renderers.
//!
//! One function per plot kind. Each normalizes its series, issues draw calls on the
//! [`Axes`] it is given, applies the finishing steps of its kind and hands the axes
//! back.

mod bar;
mod contour;
mod hist;
mod line;
mod surface;

use crate::axes::Axes;
use crate::error::Result;
use crate::spec::{AxesOptions, PlotData, PlotSpec};

pub use bar::{bar_tick_positions, bar_width, render_bar, BAR_GAP};
pub use contour::{color_bounds, render_contour};
pub use hist::render_hist;
pub use line::{render_line, DATE_FORMAT};
pub use surface::render_surface;

/// Half-width of error bar caps, in points
pub const CAP_SIZE: f64 = 3.0;

/// Render a specification into `axes` and return the finished axes
pub fn render_spec(spec: &PlotSpec, axes: Axes) -> Result<Axes> {
    let options = &spec.options;
    match &spec.data {
        PlotData::Line2D(series) => render_line(series, options, axes),
        PlotData::Histogram(series) => render_hist(series, options, axes),
        PlotData::Bar(series) => render_bar(series, options, axes),
        PlotData::Surface3D(series) => render_surface(series, options, axes),
        PlotData::ContourMap(series) => render_contour(series, options, axes),
    }
}

/// Title plus x and y labels
fn add_labels(axes: &mut Axes, options: &AxesOptions) {
    axes.set_title(&options.title);
    axes.set_xlabel(&options.x_label);
    axes.set_ylabel(&options.y_label);
}

/// Explicit x and y limits, when given
fn add_limits_xy(axes: &mut Axes, options: &AxesOptions) {
    if let Some(range) = options.range_x {
        axes.set_xlim(range);
    }
    if let Some(range) = options.range_y {
        axes.set_ylim(range);
    }
}
