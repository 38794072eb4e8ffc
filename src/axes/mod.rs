//! Axes model.
//!
//! An [`Axes`] is one subplot: the artists drawn into it plus its cosmetic state.
//! Renderers only talk to this type; backends read it back to produce images or
//! terminal previews. Limits that were not set explicitly are autoscaled from the
//! artists, so the orchestrator can query spans before anything is rasterized.

pub mod colormap;
pub mod contour;
pub mod histogram;

use crate::error::{Error, Result};
use crate::spec::{LegendLocation, LineStyle};

pub use colormap::Colormap;
pub use histogram::{compute_bins, Bins};

/// `(min, max)` pair of an axis
pub type Range = (f64, f64);

/// 8-bit RGB color
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);

/// Fraction of the data span added on both sides when autoscaling
pub const AUTOSCALE_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Rectilinear,
    ThreeD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    X,
    Y,
    Z,
}

/// Axis scale. Non-positive values are clipped on a log axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    /// Position of `value` along an axis with this scale; `None` when it cannot be shown
    pub fn project(&self, value: f64) -> Option<f64> {
        match self {
            Scale::Linear => value.is_finite().then_some(value),
            Scale::Log => (value.is_finite() && value > 0.0).then(|| value.log10()),
        }
    }

    /// View limits in projected units
    pub fn project_range(&self, range: Range) -> Range {
        match self {
            Scale::Linear => ordered(range),
            Scale::Log => {
                let hi = if range.1 > 0.0 { range.1 } else { 10.0 };
                let lo = if range.0 > 0.0 { range.0 } else { hi / 1000.0 };
                ordered((lo.log10(), hi.log10()))
            }
        }
    }

    /// Tick label of a projected position
    pub fn tick_label(&self, position: f64, format: &TickFormat) -> String {
        match self {
            Scale::Linear => format.format(position),
            Scale::Log => format_number(10f64.powf(position)),
        }
    }
}

/// Increasing, non-empty range
pub fn ordered(range: Range) -> Range {
    let (lo, hi) = if range.0 <= range.1 {
        range
    } else {
        (range.1, range.0)
    };
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    Solid,
    Dashed,
}

/// Formatting of tick labels
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TickFormat {
    #[default]
    Plain,
    /// Values are Unix timestamps in seconds, formatted with a chrono pattern
    Date(String),
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Plain => format_number(value),
            TickFormat::Date(pattern) => {
                match chrono::DateTime::from_timestamp(value.round() as i64, 0) {
                    Some(datetime) => datetime.format(pattern).to_string(),
                    None => format_number(value),
                }
            }
        }
    }
}

/// Compact number formatting for tick labels
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    match magnitude {
        m if m >= 5 || m <= -4 => format!("{:.1e}", value),
        m if m >= 2 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        0 => format!("{:.2}", value),
        _ => format!("{:.3}", value),
    }
}

/// Something drawn into an axes
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Line {
        x: Vec<f64>,
        y: Vec<f64>,
        style: LineStyle,
        label: String,
    },
    ErrorBar {
        x: Vec<f64>,
        y: Vec<f64>,
        x_err: Vec<f64>,
        y_err: Vec<f64>,
        style: LineStyle,
        label: String,
        /// Whisker cap half-width in pixels
        cap_size: f64,
    },
    Histogram {
        bins: Bins,
        alpha: f64,
        label: String,
    },
    Bars {
        /// Bar centers
        positions: Vec<f64>,
        heights: Vec<f64>,
        width: f64,
        y_err: Vec<f64>,
        cap_size: f64,
        label: String,
    },
    Scatter3D {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        label: String,
    },
    TriSurface {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        triangles: Vec<[usize; 3]>,
        colormap: Colormap,
    },
    FilledContour {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        triangles: Vec<[usize; 3]>,
        /// Band boundaries, `bands + 1` values from `vmin` to `vmax`
        levels: Vec<f64>,
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
    },
}

impl Artist {
    /// Legend label; surfaces and contours never get a legend entry
    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Line { label, .. }
            | Artist::ErrorBar { label, .. }
            | Artist::Histogram { label, .. }
            | Artist::Bars { label, .. }
            | Artist::Scatter3D { label, .. } => Some(label),
            Artist::TriSurface { .. } | Artist::FilledContour { .. } => None,
        }
    }

    /// Data extent along `dim`, ignoring non-finite values (and non-positive ones
    /// when `positive_only`)
    pub fn extent(&self, dim: Dimension, positive_only: bool) -> Option<Range> {
        let values: Vec<f64> = match (self, dim) {
            (Artist::Line { x, .. }, Dimension::X) => x.clone(),
            (Artist::Line { y, .. }, Dimension::Y) => y.clone(),
            (Artist::ErrorBar { x, x_err, .. }, Dimension::X) => spread(x, x_err),
            (Artist::ErrorBar { y, y_err, .. }, Dimension::Y) => spread(y, y_err),
            (Artist::Histogram { bins, .. }, Dimension::X) => bins.edges.clone(),
            (Artist::Histogram { bins, .. }, Dimension::Y) => {
                let mut values = bins.heights.clone();
                values.push(0.0);
                values
            }
            (Artist::Bars { positions, width, .. }, Dimension::X) => positions
                .iter()
                .flat_map(|p| [p - width / 2.0, p + width / 2.0])
                .collect(),
            (Artist::Bars { heights, y_err, .. }, Dimension::Y) => {
                let mut values = spread(heights, y_err);
                values.push(0.0);
                values
            }
            (Artist::Scatter3D { x, .. }, Dimension::X)
            | (Artist::TriSurface { x, .. }, Dimension::X)
            | (Artist::FilledContour { x, .. }, Dimension::X) => x.clone(),
            (Artist::Scatter3D { y, .. }, Dimension::Y)
            | (Artist::TriSurface { y, .. }, Dimension::Y)
            | (Artist::FilledContour { y, .. }, Dimension::Y) => y.clone(),
            (Artist::Scatter3D { z, .. }, Dimension::Z) | (Artist::TriSurface { z, .. }, Dimension::Z) => {
                z.clone()
            }
            _ => return None,
        };
        span(values.into_iter(), positive_only)
    }

    /// Artists whose extent is used as is, without autoscale margins
    fn is_tight(&self) -> bool {
        matches!(self, Artist::FilledContour { .. })
    }
}

fn spread(values: &[f64], errors: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    for (v, e) in values.iter().zip(errors) {
        out.push(v - e.abs());
        out.push(v + e.abs());
    }
    out
}

/// Min/max of the finite values of an iterator
pub fn span(values: impl Iterator<Item = f64>, positive_only: bool) -> Option<Range> {
    values
        .filter(|v| v.is_finite() && (!positive_only || *v > 0.0))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn join(a: Option<Range>, b: Option<Range>) -> Option<Range> {
    match (a, b) {
        (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Pad a data extent the way autoscaling does
fn pad(range: Range, scale: Scale, margin: f64) -> Range {
    let (lo, hi) = range;
    match scale {
        Scale::Linear => {
            if (hi - lo).abs() < f64::EPSILON {
                let delta = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
                (lo - delta, hi + delta)
            } else {
                let m = (hi - lo) * margin;
                (lo - m, hi + m)
            }
        }
        Scale::Log => {
            let (llo, lhi) = (lo.log10(), hi.log10());
            if (lhi - llo).abs() < f64::EPSILON {
                (lo / 10.0, hi * 10.0)
            } else {
                let m = (lhi - llo) * margin;
                (10f64.powf(llo - m), 10f64.powf(lhi + m))
            }
        }
    }
}

/// Color bar attached to the last filled contour of an axes
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub label: String,
    pub colormap: Colormap,
    pub levels: Vec<f64>,
    pub vmin: f64,
    pub vmax: f64,
}

/// Legend box: its anchor and the labels it lists
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub location: LegendLocation,
    pub entries: Vec<String>,
}

/// One subplot
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    projection: Projection,
    artists: Vec<Artist>,
    title: String,
    x_label: String,
    y_label: String,
    z_label: String,
    x_lim: Option<Range>,
    y_lim: Option<Range>,
    z_lim: Option<Range>,
    x_scale: Scale,
    y_scale: Scale,
    grid: Option<GridStyle>,
    x_tick_format: TickFormat,
    x_ticks: Option<Vec<(f64, String)>>,
    pane_colors: Option<[Rgb; 3]>,
    color_bar: Option<ColorBar>,
    legend: Option<Legend>,
    aspect: Option<f64>,
}

impl Axes {
    pub fn new(projection: Projection) -> Self {
        Axes {
            projection,
            artists: Vec::new(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            z_label: String::new(),
            x_lim: None,
            y_lim: None,
            z_lim: None,
            x_scale: Scale::Linear,
            y_scale: Scale::Linear,
            grid: None,
            x_tick_format: TickFormat::Plain,
            x_ticks: None,
            pane_colors: None,
            color_bar: None,
            legend: None,
            aspect: None,
        }
    }

    pub fn new_2d() -> Self {
        Self::new(Projection::Rectilinear)
    }

    pub fn new_3d() -> Self {
        Self::new(Projection::ThreeD)
    }

    // ------------------------------------------------------------------
    // drawing primitives
    // ------------------------------------------------------------------

    /// Connected line through the points
    pub fn plot(&mut self, x: &[f64], y: &[f64], style: LineStyle, label: &str) {
        self.artists.push(Artist::Line {
            x: x.to_vec(),
            y: y.to_vec(),
            style,
            label: label.to_string(),
        });
    }

    /// Line with symmetric x and y error whiskers
    pub fn errorbar(
        &mut self,
        x: &[f64],
        y: &[f64],
        x_err: &[f64],
        y_err: &[f64],
        style: LineStyle,
        label: &str,
        cap_size: f64,
    ) {
        self.artists.push(Artist::ErrorBar {
            x: x.to_vec(),
            y: y.to_vec(),
            x_err: x_err.to_vec(),
            y_err: y_err.to_vec(),
            style,
            label: label.to_string(),
            cap_size,
        });
    }

    /// Histogram of `x` over `bins` equal-width bins
    pub fn hist(&mut self, x: &[f64], bins: usize, density: bool, alpha: f64, label: &str) {
        self.artists.push(Artist::Histogram {
            bins: compute_bins(x, bins, density),
            alpha,
            label: label.to_string(),
        });
    }

    /// Bars centered on `positions`
    pub fn bar(
        &mut self,
        positions: &[f64],
        heights: &[f64],
        width: f64,
        y_err: &[f64],
        cap_size: f64,
        label: &str,
    ) {
        self.artists.push(Artist::Bars {
            positions: positions.to_vec(),
            heights: heights.to_vec(),
            width,
            y_err: y_err.to_vec(),
            cap_size,
            label: label.to_string(),
        });
    }

    pub fn scatter_3d(&mut self, x: &[f64], y: &[f64], z: &[f64], label: &str) {
        self.artists.push(Artist::Scatter3D {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
            label: label.to_string(),
        });
    }

    /// Surface over the Delaunay triangulation of `(x, y)`
    pub fn plot_trisurf(&mut self, x: &[f64], y: &[f64], z: &[f64], colormap: Colormap) {
        self.artists.push(Artist::TriSurface {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
            triangles: triangulate(x, y),
            colormap,
        });
    }

    /// Filled contour with `bands` evenly spaced bands between `vmin` and `vmax`
    pub fn tricontourf(
        &mut self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
        bands: usize,
        colormap: Colormap,
        vmin: f64,
        vmax: f64,
    ) {
        let bands = bands.max(1);
        let step = (vmax - vmin) / bands as f64;
        let levels = (0..=bands).map(|i| vmin + i as f64 * step).collect();
        self.artists.push(Artist::FilledContour {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.to_vec(),
            triangles: triangulate(x, y),
            levels,
            colormap,
            vmin,
            vmax,
        });
    }

    // ------------------------------------------------------------------
    // decoration
    // ------------------------------------------------------------------

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.x_label = label.to_string();
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.y_label = label.to_string();
    }

    pub fn set_zlabel(&mut self, label: &str) {
        self.z_label = label.to_string();
    }

    pub fn set_xlim(&mut self, range: Range) {
        self.x_lim = Some(range);
    }

    pub fn set_ylim(&mut self, range: Range) {
        self.y_lim = Some(range);
    }

    pub fn set_zlim(&mut self, range: Range) {
        self.z_lim = Some(range);
    }

    pub fn set_xscale(&mut self, scale: Scale) {
        self.x_scale = scale;
    }

    pub fn set_yscale(&mut self, scale: Scale) {
        self.y_scale = scale;
    }

    pub fn grid(&mut self, style: GridStyle) {
        self.grid = Some(style);
    }

    pub fn set_x_tick_format(&mut self, format: TickFormat) {
        self.x_tick_format = format;
    }

    /// Fixed x ticks. Extra positions or labels are dropped.
    pub fn set_xticks(&mut self, positions: &[f64], labels: &[String]) {
        self.x_ticks = Some(
            positions
                .iter()
                .copied()
                .zip(labels.iter().cloned())
                .collect(),
        );
    }

    /// Background colors of the x, y and z panes of a 3D axes
    pub fn set_pane_colors(&mut self, colors: [Rgb; 3]) {
        self.pane_colors = Some(colors);
    }

    /// Attach a color bar to the most recent filled contour
    pub fn colorbar(&mut self, label: &str) -> Result<()> {
        let mappable = self.artists.iter().rev().find_map(|artist| match artist {
            Artist::FilledContour {
                levels,
                colormap,
                vmin,
                vmax,
                ..
            } => Some(ColorBar {
                label: label.to_string(),
                colormap: *colormap,
                levels: levels.clone(),
                vmin: *vmin,
                vmax: *vmax,
            }),
            _ => None,
        });
        match mappable {
            Some(color_bar) => {
                self.color_bar = Some(color_bar);
                Ok(())
            }
            None => Err(Error::Visualization(
                "a color bar needs a filled contour to describe".to_string(),
            )),
        }
    }

    /// Legend listing every labelled artist drawn so far
    pub fn legend(&mut self, location: LegendLocation) {
        let entries = self
            .artists
            .iter()
            .filter_map(|artist| artist.label().map(str::to_string))
            .collect();
        self.legend = Some(Legend { location, entries });
    }

    /// Fixed data aspect: one y unit is drawn `aspect` times as long as one x unit
    pub fn set_aspect(&mut self, aspect: f64) {
        self.aspect = Some(aspect);
    }

    // ------------------------------------------------------------------
    // queries
    // ------------------------------------------------------------------

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn z_label(&self) -> &str {
        &self.z_label
    }

    pub fn x_scale(&self) -> Scale {
        self.x_scale
    }

    pub fn y_scale(&self) -> Scale {
        self.y_scale
    }

    pub fn grid_style(&self) -> Option<GridStyle> {
        self.grid
    }

    pub fn x_tick_format(&self) -> &TickFormat {
        &self.x_tick_format
    }

    pub fn x_ticks(&self) -> Option<&[(f64, String)]> {
        self.x_ticks.as_deref()
    }

    pub fn pane_colors(&self) -> Option<[Rgb; 3]> {
        self.pane_colors
    }

    pub fn color_bar(&self) -> Option<&ColorBar> {
        self.color_bar.as_ref()
    }

    pub fn legend_box(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn aspect(&self) -> Option<f64> {
        self.aspect
    }

    fn scale_of(&self, dim: Dimension) -> Scale {
        match dim {
            Dimension::X => self.x_scale,
            Dimension::Y => self.y_scale,
            Dimension::Z => Scale::Linear,
        }
    }

    /// Extent of the artists along `dim`, without margins
    pub fn data_limits(&self, dim: Dimension) -> Option<Range> {
        let positive_only = self.scale_of(dim) == Scale::Log;
        self.artists
            .iter()
            .fold(None, |acc, artist| join(acc, artist.extent(dim, positive_only)))
    }

    /// Autoscaled view limits along `dim`
    fn autoscale(&self, dim: Dimension) -> Range {
        let scale = self.scale_of(dim);
        let positive_only = scale == Scale::Log;
        let padded = self.artists.iter().fold(None, |acc, artist| {
            let extent = artist.extent(dim, positive_only).map(|range| {
                if artist.is_tight() {
                    range
                } else {
                    pad(range, scale, AUTOSCALE_MARGIN)
                }
            });
            join(acc, extent)
        });
        match (padded, scale) {
            (Some(range), _) => range,
            (None, Scale::Linear) => (0.0, 1.0),
            (None, Scale::Log) => (1.0, 10.0),
        }
    }

    /// Current x view limits: explicit limits if set, autoscaled otherwise
    pub fn x_lim(&self) -> Range {
        self.x_lim.unwrap_or_else(|| self.autoscale(Dimension::X))
    }

    pub fn y_lim(&self) -> Range {
        self.y_lim.unwrap_or_else(|| self.autoscale(Dimension::Y))
    }

    pub fn z_lim(&self) -> Range {
        self.z_lim.unwrap_or_else(|| self.autoscale(Dimension::Z))
    }
}

/// Delaunay triangulation of scattered `(x, y)` points.
///
/// Degenerate input (fewer than three points, all collinear) yields no triangles.
pub fn triangulate(x: &[f64], y: &[f64]) -> Vec<[usize; 3]> {
    let points: Vec<delaunator::Point> = x
        .iter()
        .zip(y)
        .map(|(&x, &y)| delaunator::Point { x, y })
        .collect();
    delaunator::triangulate(&points)
        .triangles
        .chunks_exact(3)
        .map(|t| [t[0], t[1], t[2]])
        .collect()
}
