//! Convenience layer over `plotters` for quick scientific plots.
//!
//! A [`PlotSpec`] describes one subplot: 2D lines with optional error bars,
//! histograms, grouped bars, 3D scatter/surface plots or contour maps, plus the
//! cosmetic options of its axes. [`figure::render`] lays specifications out on a figure and
//! saves or previews it, [`export()`] dumps their series to a ragged CSV file, and
//! [`dispatch`] does both on a background thread.
//!
//! ```no_run
//! use simpleplot::{dispatch, LineSeries, PlotSpec, RenderOptions};
//!
//! let spec = PlotSpec::line(vec![
//!     LineSeries::new(vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 8.0]).with_label("growth"),
//! ])
//! .with_title("Example");
//! let options = RenderOptions::default().with_image("example.png");
//! dispatch::plot_and_save(spec, options, "example.csv")?.wait();
//! # Ok::<(), simpleplot::Error>(())
//! ```
#![allow(clippy::too_many_arguments)]

pub mod axes;
pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod export;
pub mod figure;
pub mod normalize;
pub mod render;
pub mod spec;

// Re-export commonly used types
pub use axes::Axes;
pub use config::FigureConfig;
pub use dispatch::{plot, plot_and_save, RenderHandle};
pub use error::{Error, Result};
pub use export::{export, export_to_writer, export_value};
pub use figure::{render, Figure, GridShape, Plots, RenderOptions};
pub use normalize::{normalize, NormalizedData};
pub use render::render_spec;
pub use spec::{
    AxesOptions, BarSeries, ContourSeries, ErrorValue, HistSeries, LegendLocation, LineSeries,
    LineStyle, PlotData, PlotKind, PlotSpec, Surface3dSeries, SurfaceType, XFormat,
};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
