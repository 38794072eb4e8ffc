// 3D surface and contour map of the same scattered field, previewed in the terminal
use simpleplot::{
    render, ContourSeries, FigureConfig, PlotSpec, RenderOptions, Surface3dSeries, SurfaceType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Scattered samples of a smooth field
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for i in 0..15 {
        for j in 0..15 {
            let (px, py) = (i as f64 / 2.0 - 3.5, j as f64 / 2.0 - 3.5);
            x.push(px);
            y.push(py);
            z.push((-(px * px + py * py) / 6.0).exp() * (px * 1.5).cos());
        }
    }

    let mut surface = PlotSpec::surface(vec![Surface3dSeries::new(x.clone(), y.clone(), z.clone())
        .with_surface_type(SurfaceType::Triangulated)])
    .with_title("Surface");
    surface.options.z_label = "height".to_string();

    let mut contour = PlotSpec::contour(ContourSeries::new(x, y, z)).with_title("Contour map");
    contour.options.z_label = "height".to_string();
    contour.options.interpolation_samples = 8;

    let config = FigureConfig::from_toml_str("width = 640\nheight = 480\npreview_width = 50")?;
    let options = RenderOptions::default()
        .with_grid(1, 2)
        .with_config(config)
        .with_image("surface_and_contour.svg");
    let figure = render(vec![surface, contour], &options)?;

    println!("{}", figure.preview());
    println!("Wrote surface_and_contour.svg");
    Ok(())
}
