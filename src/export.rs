//! Ragged CSV dump of the series behind a plot.
//!
//! Every (series, field) pair becomes one column whose first cell is the header
//! `<field>_<label>`, with error fields named `xsd` and `ysd`. Row `i` holds the
//! `i`-th cell of every column that is long enough, so rows past the end of a short
//! column are simply shorter.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use log::{debug, info};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize::{
    normalize, NormalizedBar, NormalizedContour, NormalizedData, NormalizedHist, NormalizedLine,
    NormalizedSurface,
};
use crate::spec::{PlotKind, PlotSpec};

/// Fields dumped for each series of a plot kind, in column order
pub fn export_fields(kind: PlotKind) -> &'static [&'static str] {
    match kind {
        PlotKind::Line2D => &["x", "y", "xsd", "ysd"],
        PlotKind::Histogram => &["x"],
        PlotKind::Bar => &["x", "ysd", "labels"],
        PlotKind::Surface3D | PlotKind::ContourMap => &["x", "y", "z"],
    }
}

/// A normalized series whose fields can be dumped by name
trait ExportSeries {
    fn label(&self) -> &str;

    fn field(&self, name: &str) -> Option<Vec<String>>;
}

fn cells(values: &[f64]) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.to_string()).collect())
}

impl ExportSeries for NormalizedLine {
    fn label(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "x" => cells(&self.x),
            "y" => cells(&self.y),
            "xsd" => cells(&self.x_error),
            "ysd" => cells(&self.y_error),
            _ => None,
        }
    }
}

impl ExportSeries for NormalizedHist {
    fn label(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "x" => cells(&self.x),
            _ => None,
        }
    }
}

impl ExportSeries for NormalizedBar {
    fn label(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "x" => cells(&self.x),
            "ysd" => cells(&self.y_error),
            "labels" => Some(self.labels.clone()),
            _ => None,
        }
    }
}

impl ExportSeries for NormalizedSurface {
    fn label(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "x" => cells(&self.x),
            "y" => cells(&self.y),
            "z" => cells(&self.z),
            _ => None,
        }
    }
}

impl ExportSeries for NormalizedContour {
    fn label(&self) -> &str {
        &self.label
    }

    fn field(&self, name: &str) -> Option<Vec<String>> {
        match name {
            "x" => cells(&self.x),
            "y" => cells(&self.y),
            "z" => cells(&self.z),
            _ => None,
        }
    }
}

fn header(field: &str, label: &str) -> String {
    format!("{}_{}", field, label.replace(' ', "_"))
}

fn series_columns<S: ExportSeries>(series: &[S], fields: &[&str]) -> Vec<Vec<String>> {
    let mut columns = Vec::with_capacity(series.len() * fields.len());
    for s in series {
        for field in fields {
            if let Some(values) = s.field(field) {
                let mut column = Vec::with_capacity(values.len() + 1);
                column.push(header(field, s.label()));
                column.extend(values);
                columns.push(column);
            }
        }
    }
    columns
}

/// Columns of a specification, series-major, each starting with its header
pub fn columns(spec: &PlotSpec) -> Vec<Vec<String>> {
    let fields = export_fields(spec.kind());
    match normalize(&spec.data) {
        NormalizedData::Line2D(lines) => series_columns(&lines, fields),
        NormalizedData::Histogram(hists) => series_columns(&hists, fields),
        NormalizedData::Bar(bars) => series_columns(&bars, fields),
        NormalizedData::Surface3D(surfaces) => series_columns(&surfaces, fields),
        NormalizedData::ContourMap(contour) => {
            series_columns(std::slice::from_ref(&contour), fields)
        }
    }
}

/// Write the ragged dump of `spec` to any writer
pub fn export_to_writer<W: Write>(spec: &PlotSpec, writer: W) -> Result<()> {
    let columns = columns(spec);
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);
    debug!(
        "exporting {} plot: {} columns, {} rows",
        spec.kind(),
        columns.len(),
        rows
    );

    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .quote(b'|')
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(writer);

    for i in 0..rows {
        let row: Vec<&str> = columns
            .iter()
            .filter_map(|column| column.get(i).map(String::as_str))
            .collect();
        wtr.write_record(&row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

/// Write the ragged dump of `spec` to `path`, replacing any existing file
pub fn export<P: AsRef<Path>>(spec: &PlotSpec, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(Error::Io)?;
    export_to_writer(spec, file)?;
    info!("exported {} plot to {}", spec.kind(), path.display());
    Ok(())
}

/// Read a loose JSON specification and export it.
///
/// The kind is checked before the file is created, so an unknown kind leaves no file
/// behind.
pub fn export_value<P: AsRef<Path>>(value: &Value, path: P) -> Result<()> {
    let spec = PlotSpec::from_json(value)?;
    export(&spec, path)
}
