// Line, error-bar and grouped bar plots on one figure, with a CSV dump of each
use simpleplot::{
    dispatch, BarSeries, HistSeries, LegendLocation, LineSeries, LineStyle, PlotSpec,
    RenderOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Sample data
    let x: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
    let sin: Vec<f64> = x.iter().map(|&x| x.sin()).collect();
    let cos: Vec<f64> = x.iter().map(|&x| x.cos()).collect();

    // 1. Lines, one of them with error bars
    let mut lines = PlotSpec::line(vec![
        LineSeries::new(x.clone(), sin).with_label("sin(x)"),
        LineSeries::new(x.clone(), cos)
            .with_label("cos(x)")
            .with_line_style(LineStyle::Dashed)
            .with_y_error(0.1),
    ])
    .with_title("Trigonometry")
    .with_labels("x", "value");
    lines.options.legend_location = LegendLocation::LowerLeft;

    // 2. Grouped bars
    let bars = PlotSpec::bar(vec![
        BarSeries::new(vec![3.0, 5.0, 2.0], ["north", "south", "west"]).with_label("2023"),
        BarSeries::new(vec![4.0, 4.5, 3.0], ["north", "south", "west"])
            .with_label("2024")
            .with_y_error(0.3),
    ])
    .with_title("Sales by region");

    // 3. Histogram
    let samples: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 10.0).collect();
    let hist = PlotSpec::histogram(vec![HistSeries::new(samples, 12).with_alpha(0.7)])
        .with_title("Distribution");

    let options = RenderOptions::default()
        .with_grid(1, 3)
        .with_image("line_and_bars.png")
        .with_show(true);
    dispatch::plot_and_save(vec![lines, bars, hist], options, "line_and_bars.csv")?.wait();

    println!("Wrote line_and_bars.png and line_and_bars_{{0,1,2}}.csv");
    Ok(())
}
