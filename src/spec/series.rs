//! Typed series records, one record type per plot kind.
//!
//! Required fields are constructor arguments. Optional fields are `Option`s that the
//! normalizer fills with defaults, so a record never has to carry a placeholder value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Line style of a 2D series, parsed from the usual short format strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `-.`
    DashDot,
    /// `:`
    Dotted,
    /// `o` or `.`, markers without a connecting line
    Markers,
}

impl LineStyle {
    /// Short format string for this style
    pub fn as_format(&self) -> &'static str {
        match self {
            LineStyle::Solid => "-",
            LineStyle::Dashed => "--",
            LineStyle::DashDot => "-.",
            LineStyle::Dotted => ":",
            LineStyle::Markers => "o",
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            "-." | "dashdot" | "dash_dot" => Ok(LineStyle::DashDot),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "o" | "." | "markers" => Ok(LineStyle::Markers),
            other => Err(Error::InvalidValue(format!("unknown line style '{}'", other))),
        }
    }
}

/// Error magnitude of a series: one value for every point, or one value per point
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorValue {
    Scalar(f64),
    PerPoint(Vec<f64>),
}

impl ErrorValue {
    /// Expand into a per-point sequence.
    ///
    /// A scalar is repeated `len` times. A per-point sequence is returned as is, even
    /// when its length differs from `len`.
    pub fn broadcast(&self, len: usize) -> Vec<f64> {
        match self {
            ErrorValue::Scalar(value) => vec![*value; len],
            ErrorValue::PerPoint(values) => values.clone(),
        }
    }
}

impl From<f64> for ErrorValue {
    fn from(value: f64) -> Self {
        ErrorValue::Scalar(value)
    }
}

impl From<Vec<f64>> for ErrorValue {
    fn from(values: Vec<f64>) -> Self {
        ErrorValue::PerPoint(values)
    }
}

impl From<&[f64]> for ErrorValue {
    fn from(values: &[f64]) -> Self {
        ErrorValue::PerPoint(values.to_vec())
    }
}

/// One line (or error-bar line) of a 2D plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_error: Option<ErrorValue>,
    pub y_error: Option<ErrorValue>,
    pub label: Option<String>,
    pub line_style: Option<LineStyle>,
    /// `false` suppresses drawing; the series is still normalized and exported
    pub visible: Option<bool>,
}

impl LineSeries {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>) -> Self {
        LineSeries {
            x: x.into(),
            y: y.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = Some(style);
        self
    }

    pub fn with_x_error(mut self, error: impl Into<ErrorValue>) -> Self {
        self.x_error = Some(error.into());
        self
    }

    pub fn with_y_error(mut self, error: impl Into<ErrorValue>) -> Self {
        self.y_error = Some(error.into());
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }
}

/// One histogram of a histogram plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistSeries {
    pub x: Vec<f64>,
    pub bins: usize,
    /// Normalize bin heights so the histogram integrates to one
    pub density: Option<bool>,
    pub alpha: Option<f64>,
    pub label: Option<String>,
}

impl HistSeries {
    pub fn new(x: impl Into<Vec<f64>>, bins: usize) -> Self {
        HistSeries {
            x: x.into(),
            bins,
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_density(mut self, density: bool) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

/// One bar group member of a bar chart.
///
/// `x` holds the bar heights, one per category. The categories of the whole chart
/// are taken from the first series' `labels`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarSeries {
    pub x: Vec<f64>,
    pub labels: Vec<String>,
    pub y_error: Option<ErrorValue>,
    pub label: Option<String>,
}

impl BarSeries {
    pub fn new<S: Into<String>>(x: impl Into<Vec<f64>>, labels: impl IntoIterator<Item = S>) -> Self {
        BarSeries {
            x: x.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_y_error(mut self, error: impl Into<ErrorValue>) -> Self {
        self.y_error = Some(error.into());
        self
    }
}

/// How a 3D series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceType {
    #[default]
    Scatter,
    /// Delaunay-triangulated surface; has no legend entry
    Triangulated,
}

impl FromStr for SurfaceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scatter" => Ok(SurfaceType::Scatter),
            "trisurf" | "triangulated" | "surface" => Ok(SurfaceType::Triangulated),
            other => Err(Error::InvalidValue(format!("unknown surface type '{}'", other))),
        }
    }
}

/// One point cloud or surface of a 3D plot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface3dSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub surface_type: Option<SurfaceType>,
    pub label: Option<String>,
}

impl Surface3dSeries {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>, z: impl Into<Vec<f64>>) -> Self {
        Surface3dSeries {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_surface_type(mut self, surface_type: SurfaceType) -> Self {
        self.surface_type = Some(surface_type);
        self
    }
}

/// The single scattered (x, y, z) field of a contour map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub label: Option<String>,
}

impl ContourSeries {
    pub fn new(x: impl Into<Vec<f64>>, y: impl Into<Vec<f64>>, z: impl Into<Vec<f64>>) -> Self {
        ContourSeries {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceType::Scatter => write!(f, "scatter"),
            SurfaceType::Triangulated => write!(f, "trisurf"),
        }
    }
}
