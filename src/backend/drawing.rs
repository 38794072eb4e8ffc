//! PNG and SVG output through `plotters`.
//!
//! Log axes are drawn on log10-transformed values with ticks labelled in data units;
//! points that cannot be shown on a log axis are clipped. 3D subplots map the data z
//! axis onto the vertical axis of the plotters projection.

use std::path::Path;

use log::debug;
use plotters::{
    backend::DrawingBackend,
    chart::{ChartBuilder, ChartContext, SeriesLabelPosition},
    coord::{cartesian::Cartesian2d, ranged3d::Cartesian3d, types::RangedCoordf64, Shift},
    element::{Circle, EmptyElement, ErrorBar, PathElement, Polygon, Rectangle, Text},
    prelude::{BitMapBackend, DrawingArea, IntoDrawingArea, SVGBackend},
    series::{DashedLineSeries, LineSeries},
    style::text_anchor::{HPos, Pos, VPos},
    style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle, TextStyle},
};

use crate::axes::contour::band_polygons;
use crate::axes::{
    format_number, ordered, span, Artist, Axes, ColorBar, GridStyle, Projection, Rgb, Scale,
    TickFormat,
};
use crate::config::FigureConfig;
use crate::error::Result;
use crate::figure::Figure;
use crate::spec::{LegendLocation, LineStyle};

use super::ImageFormat;

type Chart2d<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type Chart3d<'a, DB> =
    ChartContext<'a, DB, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>;

const BLACK: Rgb = (0, 0, 0);
const WHITE: Rgb = (255, 255, 255);
const DEFAULT_PANE: Rgb = (235, 235, 235);
/// Width reserved for a color bar, in pixels
const COLOR_BAR_WIDTH: u32 = 110;

/// Draw `figure` to `path`, as PNG or SVG depending on the extension
pub fn save_figure(figure: &Figure, path: &Path) -> Result<()> {
    let size = figure.pixel_size()?;
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present()?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure)?;
            root.present()?;
        }
    }
    Ok(())
}

/// Draw every subplot of `figure` into its grid cell of `root`
pub fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    fill_area(root, WHITE)?;
    let grid = figure.grid();
    let cells = root.split_evenly((grid.rows.max(1), grid.cols.max(1)));
    for (i, (axes, cell)) in figure.axes().iter().zip(cells.iter()).enumerate() {
        debug!("drawing subplot {}", i + 1);
        match axes.projection() {
            Projection::Rectilinear => draw_2d(cell, axes, figure.config())?,
            Projection::ThreeD => draw_3d(cell, axes, figure.config())?,
        }
    }
    Ok(())
}

fn fill_area<DB>(area: &DrawingArea<DB, Shift>, color: Rgb) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    area.fill(&RGBAColor(color.0, color.1, color.2, 1.0))?;
    Ok(())
}

fn line_style(color: Rgb, alpha: f64, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: RGBAColor(color.0, color.1, color.2, alpha),
        filled: false,
        stroke_width: width,
    }
}

fn fill_style(color: Rgb, alpha: f64) -> ShapeStyle {
    ShapeStyle {
        color: RGBAColor(color.0, color.1, color.2, alpha),
        filled: true,
        stroke_width: 1,
    }
}

fn font(config: &FigureConfig, size: u32) -> FontDesc<'_> {
    FontDesc::new(
        FontFamily::from(config.font_family.as_str()),
        f64::from(size),
        FontStyle::Normal,
    )
}

fn legend_position(location: LegendLocation) -> SeriesLabelPosition {
    match location {
        LegendLocation::Best | LegendLocation::UpperRight => SeriesLabelPosition::UpperRight,
        LegendLocation::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendLocation::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendLocation::LowerRight => SeriesLabelPosition::LowerRight,
        LegendLocation::Right | LegendLocation::CenterRight => SeriesLabelPosition::MiddleRight,
        LegendLocation::CenterLeft => SeriesLabelPosition::MiddleLeft,
        LegendLocation::LowerCenter => SeriesLabelPosition::LowerMiddle,
        LegendLocation::UpperCenter => SeriesLabelPosition::UpperMiddle,
        LegendLocation::Center => SeriesLabelPosition::MiddleMiddle,
    }
}

/// Shrink a cell so its box keeps the aspect stored on `axes`
fn fit_aspect<DB: DrawingBackend>(
    cell: &DrawingArea<DB, Shift>,
    axes: &Axes,
) -> DrawingArea<DB, Shift> {
    let (width, height) = cell.dim_in_pixel();
    let (x0, x1) = axes.x_lim();
    let (y0, y1) = axes.y_lim();
    let box_ratio = match axes.aspect() {
        Some(aspect) if (x1 - x0).abs() > 0.0 => aspect * ((y1 - y0) / (x1 - x0)).abs(),
        _ => return cell.margin(0, 0, 0, 0),
    };
    if !box_ratio.is_finite() || box_ratio <= 0.0 || width == 0 || height == 0 {
        return cell.margin(0, 0, 0, 0);
    }
    let wanted_height = (f64::from(width) * box_ratio).round() as u32;
    if wanted_height < height {
        let pad = (height - wanted_height) / 2;
        cell.margin(pad, pad, 0, 0)
    } else {
        let wanted_width = (f64::from(height) / box_ratio).round() as u32;
        let pad = width.saturating_sub(wanted_width) / 2;
        cell.margin(0, 0, pad, pad)
    }
}

struct AxisMap {
    x_scale: Scale,
    y_scale: Scale,
}

impl AxisMap {
    fn point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((self.x_scale.project(x)?, self.y_scale.project(y)?))
    }

    fn points(&self, x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
        x.iter()
            .zip(y)
            .filter_map(|(&x, &y)| self.point(x, y))
            .collect()
    }
}

fn draw_2d<DB>(cell: &DrawingArea<DB, Shift>, axes: &Axes, config: &FigureConfig) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = fit_aspect(cell, axes);
    let (plot_area, bar_area) = match axes.color_bar() {
        Some(_) => {
            let (width, _) = area.dim_in_pixel();
            let (plot, bar) = area.split_horizontally(width.saturating_sub(COLOR_BAR_WIDTH));
            (plot, Some(bar))
        }
        None => (area.margin(0, 0, 0, 0), None),
    };

    let map = AxisMap {
        x_scale: axes.x_scale(),
        y_scale: axes.y_scale(),
    };
    let (x0, x1) = map.x_scale.project_range(axes.x_lim());
    let (y0, y1) = map.y_scale.project_range(axes.y_lim());

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(10).x_label_area_size(40).y_label_area_size(55);
    if !axes.title().is_empty() {
        builder.caption(axes.title(), font(config, config.title_font_size));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    let fixed_ticks = axes.x_ticks().is_some();
    let x_format = axes.x_tick_format().clone();
    let x_formatter = |v: &f64| {
        if fixed_ticks {
            String::new()
        } else {
            map.x_scale.tick_label(*v, &x_format)
        }
    };
    let y_formatter = |v: &f64| map.y_scale.tick_label(*v, &TickFormat::Plain);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(axes.x_label())
            .y_desc(axes.y_label())
            .axis_desc_style(font(config, config.label_font_size))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter);
        match axes.grid_style() {
            None => {
                mesh.disable_mesh();
            }
            Some(GridStyle::Dashed) => {
                mesh.light_line_style(line_style(BLACK, 0.0, 1))
                    .bold_line_style(line_style(BLACK, 0.15, 1));
            }
            Some(GridStyle::Solid) => {
                mesh.light_line_style(line_style(BLACK, 0.05, 1))
                    .bold_line_style(line_style(BLACK, 0.3, 1));
            }
        }
        mesh.draw()?;
    }

    let with_legend = axes
        .legend_box()
        .map(|legend| !legend.entries.is_empty())
        .unwrap_or(false);

    for (i, artist) in axes.artists().iter().enumerate() {
        let color = config.series_color(i);
        let label = if with_legend { artist.label() } else { None };
        draw_artist_2d(&mut chart, artist, &map, color, label, y0)?;
    }

    if let Some(ticks) = axes.x_ticks() {
        let style = TextStyle::from(font(config, config.label_font_size))
            .pos(Pos::new(HPos::Center, VPos::Top));
        let labels = ticks.iter().filter_map(|(position, label)| {
            let x = map.x_scale.project(*position)?;
            Some(EmptyElement::at((x, y0)) + Text::new(label.clone(), (0, 6), style.clone()))
        });
        chart.draw_series(labels)?;
    }

    if let Some(legend) = axes.legend_box().filter(|_| with_legend) {
        chart
            .configure_series_labels()
            .position(legend_position(legend.location))
            .background_style(fill_style(WHITE, 0.8))
            .border_style(line_style(BLACK, 1.0, 1))
            .label_font(font(config, config.label_font_size))
            .draw()?;
    }

    if let (Some(color_bar), Some(bar_area)) = (axes.color_bar(), bar_area) {
        draw_color_bar(&bar_area, color_bar, config)?;
    }
    Ok(())
}

fn draw_styled_line<DB>(
    chart: &mut Chart2d<'_, DB>,
    points: Vec<(f64, f64)>,
    style: LineStyle,
    color: Rgb,
    label: Option<&str>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let stroke = line_style(color, 1.0, 2);
    let annotation = match style {
        LineStyle::Solid => chart.draw_series(LineSeries::new(points, stroke))?,
        LineStyle::Dashed => chart.draw_series(DashedLineSeries::new(points, 10, 6, stroke))?,
        LineStyle::DashDot => chart.draw_series(DashedLineSeries::new(points, 8, 3, stroke))?,
        LineStyle::Dotted => chart.draw_series(DashedLineSeries::new(points, 2, 4, stroke))?,
        LineStyle::Markers => chart.draw_series(
            points
                .into_iter()
                .map(|p| Circle::new(p, 3, fill_style(color, 1.0))),
        )?,
    };
    if let Some(label) = label {
        annotation
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke));
    }
    Ok(())
}

fn draw_artist_2d<DB>(
    chart: &mut Chart2d<'_, DB>,
    artist: &Artist,
    map: &AxisMap,
    color: Rgb,
    label: Option<&str>,
    bottom: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    match artist {
        Artist::Line { x, y, style, .. } => {
            draw_styled_line(chart, map.points(x, y), *style, color, label)?;
        }
        Artist::ErrorBar {
            x,
            y,
            x_err,
            y_err,
            style,
            cap_size,
            ..
        } => {
            draw_styled_line(chart, map.points(x, y), *style, color, label)?;
            let stroke = line_style(color, 1.0, 1);
            let cap = (2.0 * cap_size).round() as u32;
            let mut vertical = Vec::new();
            let mut horizontal = Vec::new();
            for (i, (&xv, &yv)) in x.iter().zip(y).enumerate() {
                let ye = y_err.get(i).copied().unwrap_or(0.0).abs();
                let xe = x_err.get(i).copied().unwrap_or(0.0).abs();
                if ye > 0.0 {
                    if let (Some((px, py)), Some((_, lo)), Some((_, hi))) =
                        (map.point(xv, yv), map.point(xv, yv - ye), map.point(xv, yv + ye))
                    {
                        vertical.push(ErrorBar::new_vertical(px, lo, py, hi, stroke, cap));
                    }
                }
                if xe > 0.0 {
                    if let (Some((px, py)), Some((lo, _)), Some((hi, _))) =
                        (map.point(xv, yv), map.point(xv - xe, yv), map.point(xv + xe, yv))
                    {
                        horizontal.push(ErrorBar::new_horizontal(py, lo, px, hi, stroke, cap));
                    }
                }
            }
            chart.draw_series(vertical)?;
            chart.draw_series(horizontal)?;
        }
        Artist::Histogram { bins, alpha, .. } => {
            let fill = fill_style(color, *alpha);
            let base = map.y_scale.project(0.0).unwrap_or(bottom);
            let rects: Vec<_> = bins
                .edges
                .windows(2)
                .zip(&bins.heights)
                .filter_map(|(edge, &height)| {
                    let (x0, top) = map.point(edge[0], height)?;
                    let x1 = map.x_scale.project(edge[1])?;
                    Some(Rectangle::new([(x0, base), (x1, top)], fill))
                })
                .collect();
            let annotation = chart.draw_series(rects)?;
            if let Some(label) = label {
                annotation
                    .label(label)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
            }
        }
        Artist::Bars {
            positions,
            heights,
            width,
            y_err,
            cap_size,
            ..
        } => {
            let fill = fill_style(color, 1.0);
            let base = map.y_scale.project(0.0).unwrap_or(bottom);
            let rects: Vec<_> = positions
                .iter()
                .zip(heights)
                .filter_map(|(&p, &h)| {
                    let (x0, top) = map.point(p - width / 2.0, h)?;
                    let x1 = map.x_scale.project(p + width / 2.0)?;
                    Some(Rectangle::new([(x0, base), (x1, top)], fill))
                })
                .collect();
            let annotation = chart.draw_series(rects)?;
            if let Some(label) = label {
                annotation
                    .label(label)
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill));
            }

            let stroke = line_style(BLACK, 1.0, 1);
            let cap = (2.0 * cap_size).round() as u32;
            let whiskers: Vec<_> = positions
                .iter()
                .zip(heights)
                .zip(y_err)
                .filter(|(_, e)| e.abs() > 0.0)
                .filter_map(|((&p, &h), &e)| {
                    let (px, py) = map.point(p, h)?;
                    let lo = map.y_scale.project(h - e.abs())?;
                    let hi = map.y_scale.project(h + e.abs())?;
                    Some(ErrorBar::new_vertical(px, lo, py, hi, stroke, cap))
                })
                .collect();
            chart.draw_series(whiskers)?;
        }
        Artist::FilledContour {
            x,
            y,
            z,
            triangles,
            levels,
            colormap,
            ..
        } => {
            let bands = levels.len().saturating_sub(1).max(1) as f64;
            let polygons: Vec<_> = band_polygons(x, y, z, triangles, levels)
                .into_iter()
                .map(|(k, polygon)| {
                    let color = colormap.eval((k as f64 + 0.5) / bands);
                    let points = polygon
                        .into_iter()
                        .filter_map(|(px, py)| map.point(px, py))
                        .collect::<Vec<_>>();
                    Polygon::new(points, fill_style(color, 1.0))
                })
                .collect();
            chart.draw_series(polygons)?;
        }
        Artist::Scatter3D { .. } | Artist::TriSurface { .. } => {
            debug!("skipping 3D artist on a 2D subplot");
        }
    }
    Ok(())
}

fn draw_color_bar<DB>(
    area: &DrawingArea<DB, Shift>,
    bar: &ColorBar,
    config: &FigureConfig,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (lo, hi) = ordered((bar.vmin, bar.vmax));
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_top(40)
        .x_label_area_size(40)
        .right_y_label_area_size(70)
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    let formatter = |v: &f64| format_number(*v);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(bar.label.as_str())
        .axis_desc_style(font(config, config.label_font_size))
        .y_label_formatter(&formatter)
        .draw()?;

    let bands = bar.levels.len().saturating_sub(1).max(1) as f64;
    let rects: Vec<_> = bar
        .levels
        .windows(2)
        .enumerate()
        .map(|(k, level)| {
            let color = bar.colormap.eval((k as f64 + 0.5) / bands);
            Rectangle::new([(0.0, level[0]), (1.0, level[1])], fill_style(color, 1.0))
        })
        .collect();
    chart.draw_series(rects)?;
    Ok(())
}

fn draw_3d<DB>(cell: &DrawingArea<DB, Shift>, axes: &Axes, config: &FigureConfig) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x0, x1) = ordered(axes.x_lim());
    let (y0, y1) = ordered(axes.y_lim());
    let (z0, z1) = ordered(axes.z_lim());

    let mut builder = ChartBuilder::on(cell);
    builder.margin(20);
    if !axes.title().is_empty() {
        builder.caption(axes.title(), font(config, config.title_font_size));
    }
    let mut chart: Chart3d<'_, DB> = builder.build_cartesian_3d(x0..x1, z0..z1, y0..y1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.75;
        pb.into_matrix()
    });

    let panes = axes.pane_colors().unwrap_or([DEFAULT_PANE; 3]);
    chart
        .configure_axes()
        .axis_panel_style(fill_style(panes[0], 1.0))
        .draw()?;

    let with_legend = axes
        .legend_box()
        .map(|legend| !legend.entries.is_empty())
        .unwrap_or(false);

    for (i, artist) in axes.artists().iter().enumerate() {
        match artist {
            Artist::Scatter3D { x, y, z, label } => {
                let fill = fill_style(config.series_color(i), 1.0);
                let points = x
                    .iter()
                    .zip(y)
                    .zip(z)
                    .map(|((&x, &y), &z)| Circle::new((x, z, y), 3, fill));
                let annotation = chart.draw_series(points)?;
                if with_legend {
                    annotation
                        .label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 3, fill));
                }
            }
            Artist::TriSurface {
                x,
                y,
                z,
                triangles,
                colormap,
            } => {
                let (lo, hi) = span(z.iter().copied(), false).unwrap_or((z0, z1));
                let polygons = triangles.iter().filter_map(|t| {
                    let corner = |i: usize| Some((*x.get(i)?, *z.get(i)?, *y.get(i)?));
                    let vertices = vec![corner(t[0])?, corner(t[1])?, corner(t[2])?];
                    let mean = vertices.iter().map(|v| v.1).sum::<f64>() / 3.0;
                    Some(Polygon::new(vertices, fill_style(colormap.map(mean, lo, hi), 0.9)))
                });
                chart.draw_series(polygons)?;
            }
            other => debug!("skipping {:?} on a 3D subplot", other.label()),
        }
    }

    if with_legend {
        if let Some(legend) = axes.legend_box() {
            chart
                .configure_series_labels()
                .position(legend_position(legend.location))
                .background_style(fill_style(WHITE, 0.8))
                .border_style(line_style(BLACK, 1.0, 1))
                .label_font(font(config, config.label_font_size))
                .draw()?;
        }
    }

    let (_, height) = cell.dim_in_pixel();
    let caption = format!(
        "x: {}   y: {}   z: {}",
        axes.x_label(),
        axes.y_label(),
        axes.z_label()
    );
    cell.draw(&Text::new(
        caption,
        (10, height as i32 - 25),
        font(config, config.label_font_size),
    ))?;
    Ok(())
}
