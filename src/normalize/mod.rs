//! Record normalization.
//!
//! Loosely-structured input (a JSON mapping or a list of mappings) is turned into the
//! typed records of [`crate::spec`] by [`records`]. The functions in this module then
//! fill every optional field with its default and return new records; the caller's
//! data is never modified.

pub mod records;

use crate::spec::{
    BarSeries, ContourSeries, ErrorValue, HistSeries, LineSeries, LineStyle, PlotData, PlotKind,
    Surface3dSeries, SurfaceType,
};

pub use records::{plot_data_from_value, records_from_value, spec_from_value, Record};

/// Label given to series that do not carry one
pub const DEFAULT_LABEL: &str = "no_label";

/// A 2D series with every default filled in
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLine {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub x_error: Vec<f64>,
    pub y_error: Vec<f64>,
    pub label: String,
    pub line_style: LineStyle,
    pub visible: bool,
    /// At least one error key was supplied, so the series is drawn with error bars
    pub has_error_bars: bool,
}

impl NormalizedLine {
    /// Convert back into a record. Error arrays are only carried over when the
    /// original series supplied one, so normalizing the result gives `self` again.
    pub fn to_series(&self) -> LineSeries {
        let (x_error, y_error) = if self.has_error_bars {
            (
                Some(ErrorValue::PerPoint(self.x_error.clone())),
                Some(ErrorValue::PerPoint(self.y_error.clone())),
            )
        } else {
            (None, None)
        };
        LineSeries {
            x: self.x.clone(),
            y: self.y.clone(),
            x_error,
            y_error,
            label: Some(self.label.clone()),
            line_style: Some(self.line_style),
            visible: Some(self.visible),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHist {
    pub x: Vec<f64>,
    pub bins: usize,
    pub density: bool,
    pub alpha: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedBar {
    pub x: Vec<f64>,
    pub labels: Vec<String>,
    pub y_error: Vec<f64>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub surface_type: SurfaceType,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedContour {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub label: String,
}

/// Fully-defaulted series of one specification
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedData {
    Line2D(Vec<NormalizedLine>),
    Histogram(Vec<NormalizedHist>),
    Bar(Vec<NormalizedBar>),
    Surface3D(Vec<NormalizedSurface>),
    ContourMap(NormalizedContour),
}

impl NormalizedData {
    pub fn kind(&self) -> PlotKind {
        match self {
            NormalizedData::Line2D(_) => PlotKind::Line2D,
            NormalizedData::Histogram(_) => PlotKind::Histogram,
            NormalizedData::Bar(_) => PlotKind::Bar,
            NormalizedData::Surface3D(_) => PlotKind::Surface3D,
            NormalizedData::ContourMap(_) => PlotKind::ContourMap,
        }
    }
}

/// Normalize every series of a specification
pub fn normalize(data: &PlotData) -> NormalizedData {
    match data {
        PlotData::Line2D(series) => NormalizedData::Line2D(series.iter().map(normalize_line).collect()),
        PlotData::Histogram(series) => {
            NormalizedData::Histogram(series.iter().map(normalize_hist).collect())
        }
        PlotData::Bar(series) => NormalizedData::Bar(series.iter().map(normalize_bar).collect()),
        PlotData::Surface3D(series) => {
            NormalizedData::Surface3D(series.iter().map(normalize_surface).collect())
        }
        PlotData::ContourMap(series) => NormalizedData::ContourMap(normalize_contour(series)),
    }
}

fn label_or_default(label: &Option<String>) -> String {
    label.clone().unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

fn warn_on_length_mismatch(label: &str, field: &str, values: &[f64], expected: usize) {
    if values.len() != expected {
        log::warn!(
            "series '{}': {} has {} values but the series has {} points",
            label,
            field,
            values.len(),
            expected
        );
    }
}

pub fn normalize_line(series: &LineSeries) -> NormalizedLine {
    let label = label_or_default(&series.label);
    let has_error_bars = series.x_error.is_some() || series.y_error.is_some();

    let x_error = match &series.x_error {
        Some(error) => error.broadcast(series.x.len()),
        None => vec![0.0; series.x.len()],
    };
    let y_error = match &series.y_error {
        Some(error) => error.broadcast(series.y.len()),
        None => vec![0.0; series.y.len()],
    };
    warn_on_length_mismatch(&label, "x_error", &x_error, series.x.len());
    warn_on_length_mismatch(&label, "y_error", &y_error, series.y.len());

    NormalizedLine {
        x: series.x.clone(),
        y: series.y.clone(),
        x_error,
        y_error,
        label,
        line_style: series.line_style.unwrap_or_default(),
        visible: series.visible.unwrap_or(true),
        has_error_bars,
    }
}

pub fn normalize_hist(series: &HistSeries) -> NormalizedHist {
    NormalizedHist {
        x: series.x.clone(),
        bins: series.bins,
        density: series.density.unwrap_or(false),
        alpha: series.alpha.unwrap_or(1.0),
        label: label_or_default(&series.label),
    }
}

pub fn normalize_bar(series: &BarSeries) -> NormalizedBar {
    let label = label_or_default(&series.label);
    let y_error = match &series.y_error {
        Some(error) => error.broadcast(series.x.len()),
        None => vec![0.0; series.x.len()],
    };
    warn_on_length_mismatch(&label, "y_error", &y_error, series.x.len());

    NormalizedBar {
        x: series.x.clone(),
        labels: series.labels.clone(),
        y_error,
        label,
    }
}

pub fn normalize_surface(series: &Surface3dSeries) -> NormalizedSurface {
    NormalizedSurface {
        x: series.x.clone(),
        y: series.y.clone(),
        z: series.z.clone(),
        surface_type: series.surface_type.unwrap_or_default(),
        label: label_or_default(&series.label),
    }
}

pub fn normalize_contour(series: &ContourSeries) -> NormalizedContour {
    NormalizedContour {
        x: series.x.clone(),
        y: series.y.clone(),
        z: series.z.clone(),
        label: label_or_default(&series.label),
    }
}
