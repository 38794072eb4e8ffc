//! Conversion of loosely-structured JSON records into typed series.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::spec::{
    AxesOptions, BarSeries, ContourSeries, ErrorValue, HistSeries, LineSeries, PlotData, PlotKind,
    PlotSpec, Surface3dSeries,
};

/// One loose series record
pub type Record = Map<String, Value>;

/// Coerce a mapping or a list of mappings into a list of records.
///
/// A single mapping becomes a one-element list. Anything else fails with
/// [`Error::InvalidDataShape`].
pub fn records_from_value(value: &Value) -> Result<Vec<Record>> {
    match value {
        Value::Object(map) => Ok(vec![map.clone()]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map.clone()),
                other => Err(Error::InvalidDataShape(format!(
                    "element {} of the series list is {}, expected a mapping",
                    i,
                    json_type_name(other)
                ))),
            })
            .collect(),
        other => Err(Error::InvalidDataShape(format!(
            "series data is {}, expected a mapping or a list of mappings",
            json_type_name(other)
        ))),
    }
}

/// Build the typed series of `kind` from loose series data
pub fn plot_data_from_value(kind: PlotKind, value: &Value) -> Result<PlotData> {
    let records = records_from_value(value)?;
    let data = match kind {
        PlotKind::Line2D => PlotData::Line2D(
            records
                .iter()
                .map(line_from_record)
                .collect::<Result<Vec<_>>>()?,
        ),
        PlotKind::Histogram => PlotData::Histogram(
            records
                .iter()
                .map(hist_from_record)
                .collect::<Result<Vec<_>>>()?,
        ),
        PlotKind::Bar => PlotData::Bar(
            records
                .iter()
                .map(bar_from_record)
                .collect::<Result<Vec<_>>>()?,
        ),
        PlotKind::Surface3D => PlotData::Surface3D(
            records
                .iter()
                .map(surface_from_record)
                .collect::<Result<Vec<_>>>()?,
        ),
        PlotKind::ContourMap => {
            let first = records.first().ok_or_else(|| {
                Error::InvalidDataShape("a contour map needs one series".to_string())
            })?;
            if records.len() > 1 {
                log::warn!(
                    "contour map takes a single series, ignoring {} extra",
                    records.len() - 1
                );
            }
            PlotData::ContourMap(contour_from_record(first)?)
        }
    };
    Ok(data)
}

/// Read a whole specification from `{"kind": ..., "data": ..., <options>}`.
///
/// The kind is resolved first, so an unknown kind fails with
/// [`Error::UnrecognizedKind`] before the data is looked at.
pub fn spec_from_value(value: &Value) -> Result<PlotSpec> {
    let object = value.as_object().ok_or_else(|| {
        Error::InvalidDataShape(format!(
            "plot specification is {}, expected a mapping",
            json_type_name(value)
        ))
    })?;

    let kind_name = object
        .get("kind")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::InvalidValue("plot specification has no 'kind' string".to_string()))?;
    let kind: PlotKind = kind_name.parse()?;

    let data_value = object
        .get("data")
        .ok_or_else(|| Error::MissingKey {
            kind,
            key: "data".to_string(),
        })?;
    let data = plot_data_from_value(kind, data_value)?;

    let mut option_fields = object.clone();
    option_fields.remove("kind");
    option_fields.remove("data");
    let options: AxesOptions = serde_json::from_value(Value::Object(option_fields))?;

    Ok(PlotSpec { data, options })
}

impl PlotSpec {
    /// See [`spec_from_value`]
    pub fn from_json(value: &Value) -> Result<Self> {
        spec_from_value(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        spec_from_value(&value)
    }
}

pub fn line_from_record(record: &Record) -> Result<LineSeries> {
    let kind = PlotKind::Line2D;
    Ok(LineSeries {
        x: required_numbers(record, kind, "x")?,
        y: required_numbers(record, kind, "y")?,
        x_error: optional_error(record, &["x_error", "xsd", "xError"])?,
        y_error: optional_error(record, &["y_error", "ysd", "yError"])?,
        label: optional_string(record, &["label"])?,
        line_style: optional_string(record, &["line_style", "linestyle", "lineStyle"])?
            .map(|s| s.parse())
            .transpose()?,
        visible: optional_bool(record, &["visible", "show"])?,
    })
}

pub fn hist_from_record(record: &Record) -> Result<HistSeries> {
    let kind = PlotKind::Histogram;
    let bins = lookup(record, &["bins"]).ok_or_else(|| Error::MissingKey {
        kind,
        key: "bins".to_string(),
    })?;
    Ok(HistSeries {
        x: required_numbers(record, kind, "x")?,
        bins: as_count("bins", bins)?,
        density: optional_bool(record, &["density", "normed"])?,
        alpha: optional_number(record, &["alpha"])?,
        label: optional_string(record, &["label"])?,
    })
}

pub fn bar_from_record(record: &Record) -> Result<BarSeries> {
    let kind = PlotKind::Bar;
    let labels = match lookup(record, &["labels"]) {
        Some(Value::Array(items)) => items.iter().map(value_to_label).collect(),
        Some(other) => {
            return Err(Error::InvalidValue(format!(
                "'labels' is {}, expected a list",
                json_type_name(other)
            )))
        }
        None => {
            return Err(Error::MissingKey {
                kind,
                key: "labels".to_string(),
            })
        }
    };
    Ok(BarSeries {
        x: required_numbers(record, kind, "x")?,
        labels,
        y_error: optional_error(record, &["y_error", "ysd", "yError"])?,
        label: optional_string(record, &["label"])?,
    })
}

pub fn surface_from_record(record: &Record) -> Result<Surface3dSeries> {
    let kind = PlotKind::Surface3D;
    Ok(Surface3dSeries {
        x: required_numbers(record, kind, "x")?,
        y: required_numbers(record, kind, "y")?,
        z: required_numbers(record, kind, "z")?,
        surface_type: optional_string(record, &["surface_type", "surftype", "surfaceType"])?
            .map(|s| s.parse())
            .transpose()?,
        label: optional_string(record, &["label"])?,
    })
}

pub fn contour_from_record(record: &Record) -> Result<ContourSeries> {
    let kind = PlotKind::ContourMap;
    Ok(ContourSeries {
        x: required_numbers(record, kind, "x")?,
        y: required_numbers(record, kind, "y")?,
        z: required_numbers(record, kind, "z")?,
        label: optional_string(record, &["label"])?,
    })
}

fn lookup<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| record.get(*key))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

fn as_number(key: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        Error::InvalidValue(format!(
            "'{}' holds {}, expected a number",
            key,
            json_type_name(value)
        ))
    })
}

fn as_numbers(key: &str, value: &Value) -> Result<Vec<f64>> {
    match value {
        Value::Array(items) => items.iter().map(|item| as_number(key, item)).collect(),
        other => Err(Error::InvalidValue(format!(
            "'{}' is {}, expected a list of numbers",
            key,
            json_type_name(other)
        ))),
    }
}

fn as_count(key: &str, value: &Value) -> Result<usize> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or_else(|| Error::InvalidValue(format!("'{}' must be a non-negative integer", key)))
}

fn value_to_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn required_numbers(record: &Record, kind: PlotKind, key: &str) -> Result<Vec<f64>> {
    let value = record.get(key).ok_or_else(|| Error::MissingKey {
        kind,
        key: key.to_string(),
    })?;
    as_numbers(key, value)
}

fn optional_number(record: &Record, keys: &[&str]) -> Result<Option<f64>> {
    lookup(record, keys)
        .filter(|value| !value.is_null())
        .map(|value| as_number(keys[0], value))
        .transpose()
}

fn optional_error(record: &Record, keys: &[&str]) -> Result<Option<ErrorValue>> {
    match lookup(record, keys) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().map(ErrorValue::Scalar)),
        Some(value) => Ok(Some(ErrorValue::PerPoint(as_numbers(keys[0], value)?))),
    }
}

fn optional_string(record: &Record, keys: &[&str]) -> Result<Option<String>> {
    match lookup(record, keys) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::InvalidValue(format!(
            "'{}' is {}, expected a string",
            keys[0],
            json_type_name(other)
        ))),
    }
}

fn optional_bool(record: &Record, keys: &[&str]) -> Result<Option<bool>> {
    match lookup(record, keys) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(Error::InvalidValue(format!(
            "'{}' is {}, expected a boolean",
            keys[0],
            json_type_name(other)
        ))),
    }
}
