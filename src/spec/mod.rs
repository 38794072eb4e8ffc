//! Plot specifications: what to draw in one subplot and how to dress it.

mod series;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use series::{
    BarSeries, ContourSeries, ErrorValue, HistSeries, LineSeries, LineStyle, Surface3dSeries,
    SurfaceType,
};

/// Chart archetype of a specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// Lines and error bars
    Line2D,
    /// Histograms
    Histogram,
    /// Grouped bar chart
    Bar,
    /// 3D scatter or triangulated surface
    Surface3D,
    /// Filled contour map with a color bar
    ContourMap,
}

impl PlotKind {
    pub const ALL: [PlotKind; 5] = [
        PlotKind::Line2D,
        PlotKind::Histogram,
        PlotKind::Bar,
        PlotKind::Surface3D,
        PlotKind::ContourMap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::Line2D => "line2d",
            PlotKind::Histogram => "histogram",
            PlotKind::Bar => "bar",
            PlotKind::Surface3D => "surface3d",
            PlotKind::ContourMap => "contour_map",
        }
    }

    /// Whether subplots of this kind need a 3D projection
    pub fn is_3d(&self) -> bool {
        matches!(self, PlotKind::Surface3D)
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line2d" | "line" | "plot2d" => Ok(PlotKind::Line2D),
            "histogram" | "hist" | "plothist" => Ok(PlotKind::Histogram),
            "bar" | "plotbar" => Ok(PlotKind::Bar),
            "surface3d" | "scatter3d" | "plot3d" => Ok(PlotKind::Surface3D),
            "contour_map" | "contour" | "map" | "plotmap" => Ok(PlotKind::ContourMap),
            _ => Err(Error::UnrecognizedKind(s.to_string())),
        }
    }
}

/// The series of a specification, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum PlotData {
    Line2D(Vec<LineSeries>),
    Histogram(Vec<HistSeries>),
    Bar(Vec<BarSeries>),
    Surface3D(Vec<Surface3dSeries>),
    /// A contour map always holds exactly one series
    ContourMap(ContourSeries),
}

impl PlotData {
    pub fn kind(&self) -> PlotKind {
        match self {
            PlotData::Line2D(_) => PlotKind::Line2D,
            PlotData::Histogram(_) => PlotKind::Histogram,
            PlotData::Bar(_) => PlotKind::Bar,
            PlotData::Surface3D(_) => PlotKind::Surface3D,
            PlotData::ContourMap(_) => PlotKind::ContourMap,
        }
    }

    pub fn series_count(&self) -> usize {
        match self {
            PlotData::Line2D(s) => s.len(),
            PlotData::Histogram(s) => s.len(),
            PlotData::Bar(s) => s.len(),
            PlotData::Surface3D(s) => s.len(),
            PlotData::ContourMap(_) => 1,
        }
    }
}

/// Where the legend box is anchored inside the axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendLocation {
    #[serde(rename = "best")]
    Best,
    #[default]
    #[serde(rename = "upper right")]
    UpperRight,
    #[serde(rename = "upper left")]
    UpperLeft,
    #[serde(rename = "lower left")]
    LowerLeft,
    #[serde(rename = "lower right")]
    LowerRight,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "center left")]
    CenterLeft,
    #[serde(rename = "center right")]
    CenterRight,
    #[serde(rename = "lower center")]
    LowerCenter,
    #[serde(rename = "upper center")]
    UpperCenter,
    #[serde(rename = "center")]
    Center,
}

/// Formatting of the x axis tick labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XFormat {
    #[default]
    Normal,
    /// x values are Unix timestamps in seconds, shown as `%Y-%m-%d`
    Date,
}

/// Cosmetic options shared by every plot kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesOptions {
    #[serde(alias = "titlename")]
    pub title: String,
    #[serde(alias = "label_x")]
    pub x_label: String,
    #[serde(alias = "label_y")]
    pub y_label: String,
    #[serde(alias = "label_z")]
    pub z_label: String,
    pub range_x: Option<(f64, f64)>,
    pub range_y: Option<(f64, f64)>,
    pub range_z: Option<(f64, f64)>,
    pub legend: bool,
    #[serde(alias = "legend_loc")]
    pub legend_location: LegendLocation,
    #[serde(alias = "logx")]
    pub log_x: bool,
    #[serde(alias = "logy")]
    pub log_y: bool,
    /// Number of contour bands of a contour map
    #[serde(alias = "interpnumber")]
    pub interpolation_samples: usize,
    #[serde(alias = "xformat")]
    pub x_format: XFormat,
}

impl Default for AxesOptions {
    fn default() -> Self {
        AxesOptions {
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            z_label: "z".to_string(),
            range_x: None,
            range_y: None,
            range_z: None,
            legend: true,
            legend_location: LegendLocation::UpperRight,
            log_x: false,
            log_y: false,
            interpolation_samples: 10,
            x_format: XFormat::Normal,
        }
    }
}

/// One chart: its series plus the options used to dress its axes
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub data: PlotData,
    pub options: AxesOptions,
}

impl PlotSpec {
    pub fn new(data: PlotData) -> Self {
        PlotSpec {
            data,
            options: AxesOptions::default(),
        }
    }

    pub fn line(series: Vec<LineSeries>) -> Self {
        Self::new(PlotData::Line2D(series))
    }

    pub fn histogram(series: Vec<HistSeries>) -> Self {
        Self::new(PlotData::Histogram(series))
    }

    pub fn bar(series: Vec<BarSeries>) -> Self {
        Self::new(PlotData::Bar(series))
    }

    pub fn surface(series: Vec<Surface3dSeries>) -> Self {
        Self::new(PlotData::Surface3D(series))
    }

    pub fn contour(series: ContourSeries) -> Self {
        Self::new(PlotData::ContourMap(series))
    }

    pub fn with_options(mut self, options: AxesOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.options.x_label = x.into();
        self.options.y_label = y.into();
        self
    }

    pub fn kind(&self) -> PlotKind {
        self.data.kind()
    }
}
