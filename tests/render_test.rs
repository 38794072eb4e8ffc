mod common;

use common::{line_fixture, sample_field};
use simpleplot::axes::{Artist, GridStyle, Projection, Scale, TickFormat};
use simpleplot::render::{bar_tick_positions, bar_width, BAR_GAP, DATE_FORMAT};
use simpleplot::{
    render, render_spec, Axes, BarSeries, ContourSeries, HistSeries, LineSeries, PlotSpec,
    RenderOptions, Surface3dSeries, SurfaceType, XFormat,
};

#[test]
fn test_line_and_errorbar_series() {
    let figure = render(line_fixture(), &RenderOptions::default()).unwrap();
    let axes = &figure.axes()[0];

    let lines = axes
        .artists()
        .iter()
        .filter(|a| matches!(a, Artist::Line { .. }))
        .count();
    let error_bars = axes
        .artists()
        .iter()
        .filter(|a| matches!(a, Artist::ErrorBar { .. }))
        .count();
    assert_eq!(lines, 1);
    assert_eq!(error_bars, 1);

    let legend = axes.legend_box().expect("legend is on by default");
    assert_eq!(legend.entries, vec!["squares", "linear"]);
    assert_eq!(axes.title(), "Fixture");
    assert_eq!(axes.grid_style(), Some(GridStyle::Dashed));
}

#[test]
fn test_invisible_series_is_skipped() {
    let spec = PlotSpec::line(vec![
        LineSeries::new(vec![1.0, 2.0], vec![1.0, 2.0]).with_label("shown"),
        LineSeries::new(vec![1.0, 2.0], vec![5.0, 6.0])
            .with_label("hidden")
            .with_visible(false),
    ]);
    let axes = render_spec(&spec, Axes::new_2d()).unwrap();
    assert_eq!(axes.artists().len(), 1);
    assert_eq!(axes.artists()[0].label(), Some("shown"));
}

#[test]
fn test_line_options() {
    let mut spec = PlotSpec::line(vec![LineSeries::new(
        vec![1.0, 10.0, 100.0],
        vec![2.0, 20.0, 200.0],
    )]);
    spec.options.log_x = true;
    spec.options.log_y = true;
    spec.options.range_x = Some((1.0, 1000.0));
    spec.options.x_format = XFormat::Date;

    let axes = render_spec(&spec, Axes::new_2d()).unwrap();
    assert_eq!(axes.x_scale(), Scale::Log);
    assert_eq!(axes.y_scale(), Scale::Log);
    assert_eq!(axes.x_lim(), (1.0, 1000.0));
    assert_eq!(
        axes.x_tick_format(),
        &TickFormat::Date(DATE_FORMAT.to_string())
    );
}

#[test]
fn test_histogram_artists() {
    let spec = PlotSpec::histogram(vec![
        HistSeries::new(vec![1.0, 2.0, 2.5, 3.0], 3).with_label("a"),
        HistSeries::new(vec![0.0, 4.0], 2).with_alpha(0.5),
    ]);
    let axes = render_spec(&spec, Axes::new_2d()).unwrap();
    assert_eq!(axes.artists().len(), 2);
    match &axes.artists()[1] {
        Artist::Histogram { alpha, label, bins } => {
            assert_eq!(*alpha, 0.5);
            assert_eq!(label, "no_label");
            assert_eq!(bins.heights.len(), 2);
        }
        other => panic!("unexpected artist: {:?}", other),
    }
    assert_eq!(axes.grid_style(), Some(GridStyle::Solid));
}

#[test]
fn test_bar_geometry() {
    let spec = PlotSpec::bar(vec![
        BarSeries::new(vec![1.0, 2.0, 3.0], ["a", "b", "c"]).with_label("first"),
        BarSeries::new(vec![2.0, 1.0, 0.5], ["x", "y", "z"]).with_label("second"),
    ]);
    let axes = render_spec(&spec, Axes::new_2d()).unwrap();

    let width = bar_width(2);
    assert!((2.0 * width + BAR_GAP - 1.0).abs() < 1e-12);

    match &axes.artists()[1] {
        Artist::Bars {
            positions, width: w, ..
        } => {
            assert_eq!(*w, width);
            for (i, p) in positions.iter().enumerate() {
                assert!((p - (i as f64 + width)).abs() < 1e-12);
            }
        }
        other => panic!("unexpected artist: {:?}", other),
    }

    let ticks = axes.x_ticks().expect("bar charts have fixed ticks");
    let expected = bar_tick_positions(3, width);
    assert_eq!(ticks.len(), 3);
    for (i, (position, label)) in ticks.iter().enumerate() {
        assert!((position - 0.5 * (2.0 * i as f64 - width + 1.0 - BAR_GAP)).abs() < 1e-12);
        assert_eq!(*position, expected[i]);
        assert_eq!(label, ["a", "b", "c"][i]);
    }
}

#[test]
fn test_bar_ignores_range_x() {
    let mut spec = PlotSpec::bar(vec![BarSeries::new(vec![1.0, 2.0], ["a", "b"])]);
    spec.options.range_x = Some((-50.0, 50.0));
    spec.options.range_y = Some((0.0, 4.0));
    let axes = render_spec(&spec, Axes::new_2d()).unwrap();
    assert_eq!(axes.y_lim(), (0.0, 4.0));
    assert_ne!(axes.x_lim(), (-50.0, 50.0));
}

#[test]
fn test_surface_kinds() {
    let (x, y, z) = sample_field();
    let mut spec = PlotSpec::surface(vec![
        Surface3dSeries::new(x.clone(), y.clone(), z.clone()).with_label("points"),
        Surface3dSeries::new(x, y, z).with_surface_type(SurfaceType::Triangulated),
    ]);
    spec.options.z_label = "height".to_string();
    spec.options.range_z = Some((-2.0, 3.0));

    let figure = render(spec, &RenderOptions::default()).unwrap();
    let axes = &figure.axes()[0];
    assert_eq!(axes.projection(), Projection::ThreeD);
    assert!(matches!(axes.artists()[0], Artist::Scatter3D { .. }));
    match &axes.artists()[1] {
        Artist::TriSurface { triangles, .. } => assert!(!triangles.is_empty()),
        other => panic!("unexpected artist: {:?}", other),
    }
    assert_eq!(axes.z_label(), "height");
    assert_eq!(axes.z_lim(), (-2.0, 3.0));
    assert!(axes.pane_colors().is_some());
    assert_eq!(axes.legend_box().unwrap().entries, vec!["points"]);
}

#[test]
fn test_contour_bounds_and_color_bar() {
    let (x, y, z) = sample_field();
    let lo = z.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut spec = PlotSpec::contour(ContourSeries::new(x, y, z));
    spec.options.z_label = "depth".to_string();
    spec.options.interpolation_samples = 6;

    let figure = render(spec, &RenderOptions::default()).unwrap();
    let axes = &figure.axes()[0];
    let bar = axes.color_bar().expect("contour maps carry a color bar");
    assert_eq!(bar.label, "depth");
    assert_eq!((bar.vmin, bar.vmax), (lo, hi));
    assert_eq!(bar.levels.len(), 7);
    assert!(axes.legend_box().is_none(), "contour maps have no legend");
}

#[test]
fn test_contour_range_z_overrides_bounds() {
    let (x, y, z) = sample_field();
    let mut spec = PlotSpec::contour(ContourSeries::new(x, y, z));
    spec.options.range_z = Some((-5.0, 5.0));
    let axes = render_spec(&spec, Axes::new_2d()).unwrap();
    let bar = axes.color_bar().unwrap();
    assert_eq!((bar.vmin, bar.vmax), (-5.0, 5.0));
}
