use serde_json::json;
use simpleplot::normalize::{
    normalize_bar, normalize_line, normalize_surface, plot_data_from_value, records_from_value,
    DEFAULT_LABEL,
};
use simpleplot::{
    BarSeries, Error, LineSeries, LineStyle, NormalizedData, PlotData, PlotKind, PlotSpec,
    Surface3dSeries, SurfaceType,
};

#[test]
fn test_single_mapping_is_wrapped() {
    let single = json!({"x": [1.0, 2.0], "y": [3.0, 4.0], "label": "run"});
    let records = records_from_value(&single).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0], *single.as_object().unwrap());

    let list = records_from_value(&json!([{"x": [1.0]}, {"x": [2.0]}])).unwrap();
    assert_eq!(list.len(), 2);

    match simpleplot::normalize(&plot_data_from_value(PlotKind::Line2D, &single).unwrap()) {
        NormalizedData::Line2D(lines) => {
            assert_eq!(lines.len(), 1);
            let line = &lines[0];
            assert_eq!(line.x, vec![1.0, 2.0]);
            assert_eq!(line.y, vec![3.0, 4.0]);
            assert_eq!(line.x_error, vec![0.0, 0.0]);
            assert_eq!(line.y_error, vec![0.0, 0.0]);
            assert_eq!(line.label, "run");
            assert_eq!(line.line_style, LineStyle::Solid);
            assert!(line.visible);
            assert!(!line.has_error_bars);
        }
        other => panic!("unexpected data: {:?}", other),
    }
}

#[test]
fn test_line_without_errors_gets_zero_arrays() {
    let line = normalize_line(&LineSeries::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0]));
    assert_eq!(line.x_error, vec![0.0; 3]);
    assert_eq!(line.y_error, vec![0.0; 2]);
    assert!(!line.has_error_bars);
    assert_eq!(line.label, DEFAULT_LABEL);
    assert_eq!(line.line_style, LineStyle::Solid);
    assert!(line.visible);
}

#[test]
fn test_scalar_error_is_broadcast() {
    let line = normalize_line(
        &LineSeries::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]).with_x_error(0.25),
    );
    assert_eq!(line.x_error, vec![0.25; 3]);
    assert_eq!(line.y_error, vec![0.0; 3]);
    assert!(line.has_error_bars);

    let bar = normalize_bar(&BarSeries::new(vec![1.0, 2.0], ["a", "b"]).with_y_error(0.1));
    assert_eq!(bar.y_error, vec![0.1, 0.1]);
}

#[test]
fn test_per_point_error_is_kept_as_is() {
    let line = normalize_line(
        &LineSeries::new(vec![1.0, 2.0], vec![4.0, 5.0]).with_y_error(vec![0.1, 0.2, 0.3]),
    );
    assert_eq!(line.y_error, vec![0.1, 0.2, 0.3]);
}

#[test]
fn test_surface_defaults_to_scatter() {
    let surface = normalize_surface(&Surface3dSeries::new(vec![0.0], vec![0.0], vec![1.0]));
    assert_eq!(surface.surface_type, SurfaceType::Scatter);
    assert_eq!(surface.label, DEFAULT_LABEL);
}

#[test]
fn test_input_is_not_modified() {
    let data = PlotData::Line2D(vec![LineSeries::new(vec![1.0], vec![2.0])]);
    let before = data.clone();
    let _ = simpleplot::normalize(&data);
    assert_eq!(data, before);
}

#[test]
fn test_normalization_is_idempotent() {
    let series = LineSeries::new(vec![1.0, 2.0], vec![3.0, 4.0])
        .with_label("a")
        .with_y_error(0.5);
    let once = normalize_line(&series);
    let twice = normalize_line(&once.to_series());
    assert_eq!(once, twice);

    let plain = normalize_line(&LineSeries::new(vec![1.0], vec![2.0]));
    assert_eq!(normalize_line(&plain.to_series()), plain);
}

#[test]
fn test_spec_from_loose_json() {
    let spec = PlotSpec::from_json(&json!({
        "kind": "Plot2D",
        "data": {"x": [1, 2, 3], "y": [2, 4, 6], "ysd": [0.1, 0.2, 0.3], "label": "run"},
        "label_x": "time",
        "logy": true
    }))
    .unwrap();
    assert_eq!(spec.kind(), PlotKind::Line2D);
    assert_eq!(spec.options.x_label, "time");
    assert!(spec.options.log_y);

    match simpleplot::normalize(&spec.data) {
        NormalizedData::Line2D(lines) => {
            assert_eq!(lines.len(), 1);
            assert_eq!(lines[0].label, "run");
            assert_eq!(lines[0].y_error, vec![0.1, 0.2, 0.3]);
            assert_eq!(lines[0].x_error, vec![0.0; 3]);
        }
        other => panic!("unexpected data: {:?}", other),
    }
}

#[test]
fn test_kind_aliases() {
    for (name, kind) in [
        ("line", PlotKind::Line2D),
        ("HIST", PlotKind::Histogram),
        ("bar", PlotKind::Bar),
        ("scatter3d", PlotKind::Surface3D),
        ("contour", PlotKind::ContourMap),
        ("map", PlotKind::ContourMap),
    ] {
        assert_eq!(name.parse::<PlotKind>().unwrap(), kind);
    }
    assert!(matches!(
        "pie".parse::<PlotKind>(),
        Err(Error::UnrecognizedKind(_))
    ));
}
