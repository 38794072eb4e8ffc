mod common;

use std::fs;

use common::{line_fixture, read_csv_rows, TempTestDir};
use simpleplot::dispatch::csv_paths;
use simpleplot::{plot, plot_and_save, Error, HistSeries, PlotSpec, RenderOptions};

#[test]
fn test_plot_and_save_writes_csv() {
    let temp_dir = TempTestDir::new("dispatch_csv").unwrap();
    let csv_path = temp_dir.join("data.csv");

    let handle = plot_and_save(line_fixture(), RenderOptions::default(), &csv_path).unwrap();
    handle.wait();

    let rows = read_csv_rows(&csv_path);
    assert_eq!(rows[0][0], "x_squares");
    assert_eq!(rows.len(), 4);
}

#[test]
fn test_several_plots_get_numbered_files() {
    let temp_dir = TempTestDir::new("dispatch_numbered").unwrap();
    let csv_path = temp_dir.join("data.csv");
    let hist = PlotSpec::histogram(vec![HistSeries::new(vec![1.0, 2.0], 2).with_label("h")]);

    plot_and_save(vec![line_fixture(), hist], RenderOptions::default(), &csv_path)
        .unwrap()
        .wait();

    assert!(!csv_path.exists());
    let second = fs::read_to_string(temp_dir.join("data_1.csv")).unwrap();
    assert_eq!(second, "x_h\n1\n2\n");
    assert!(temp_dir.join("data_0.csv").exists());
    assert_eq!(csv_paths(&csv_path, 2)[0], temp_dir.join("data_0.csv"));
}

#[test]
fn test_render_failure_is_not_returned() {
    let temp_dir = TempTestDir::new("dispatch_failure").unwrap();
    let csv_path = temp_dir.join("data.csv");
    let options = RenderOptions {
        save: true,
        ..RenderOptions::default()
    };

    let handle = plot_and_save(line_fixture(), options, &csv_path).unwrap();
    handle.wait();
    assert!(csv_path.exists(), "export still runs after a failed render");
}

#[test]
fn test_plot_without_outputs() {
    let handle = plot(vec![line_fixture()], RenderOptions::default()).unwrap();
    handle.wait();
}

#[test]
fn test_show_and_save_needs_csv_path() {
    let result = line_fixture().show_and_save(None, None, false, true, false);
    assert!(matches!(result, Err(Error::InvalidDestination(_))));
}

#[test]
fn test_show_and_save_single_plot() {
    let temp_dir = TempTestDir::new("show_and_save").unwrap();
    let csv_path = temp_dir.join("single.csv");
    line_fixture()
        .show_and_save(None, Some(csv_path.as_path()), false, true, false)
        .unwrap()
        .wait();
    assert!(csv_path.exists());
}
