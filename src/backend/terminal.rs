//! Character previews of finished subplots.
//!
//! Used by "show": every subplot is drawn into a character grid, followed by its
//! legend and color bar. 3D subplots are shown from the top, shaded by z.

use crate::axes::contour::{band_index, interpolate};
use crate::axes::{span, Artist, Axes, Projection, Range, Scale, TickFormat};
use crate::config::FigureConfig;
use crate::figure::Figure;

/// Series markers, cycled per artist
const GLYPHS: [char; 8] = ['*', 'o', '+', 'x', '#', '@', '%', '&'];
/// Shades from low to high values
const SHADES: [char; 9] = ['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;

    /// Render to stdout
    fn display(&self) {
        println!("{}", self.render());
    }
}

/// Size of a preview
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Plot width in characters
    pub width: usize,
    /// Plot height in characters
    pub height: usize,
    /// Show axis labels
    pub show_labels: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 16,
            show_labels: true,
        }
    }
}

impl From<&FigureConfig> for ChartConfig {
    fn from(config: &FigureConfig) -> Self {
        Self {
            width: config.preview_width.max(8),
            height: config.preview_height.max(4),
            show_labels: true,
        }
    }
}

/// Preview of one subplot
#[derive(Debug, Clone)]
pub struct AxesPreview<'a> {
    axes: &'a Axes,
    config: ChartConfig,
}

impl<'a> AxesPreview<'a> {
    pub fn new(axes: &'a Axes) -> Self {
        Self::with_config(axes, ChartConfig::default())
    }

    pub fn with_config(axes: &'a Axes, config: ChartConfig) -> Self {
        Self { axes, config }
    }
}

/// Previews of every subplot of a figure, top to bottom
pub fn preview(figure: &Figure) -> String {
    let config = ChartConfig::from(figure.config());
    figure
        .axes()
        .iter()
        .map(|axes| AxesPreview::with_config(axes, config.clone()).render())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Character canvas with data-to-cell mapping
struct Canvas {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
    x: Range,
    y: Range,
    x_scale: Scale,
    y_scale: Scale,
}

impl Canvas {
    fn col(&self, x: f64) -> Option<usize> {
        let x = self.x_scale.project(x)?;
        let t = (x - self.x.0) / (self.x.1 - self.x.0);
        (0.0..=1.0)
            .contains(&t)
            .then(|| (t * (self.width - 1) as f64).round() as usize)
    }

    fn row(&self, y: f64) -> Option<usize> {
        let y = self.y_scale.project(y)?;
        let t = (y - self.y.0) / (self.y.1 - self.y.0);
        (0.0..=1.0)
            .contains(&t)
            .then(|| (t * (self.height - 1) as f64).round() as usize)
    }

    /// Row of `y`, clamped onto the canvas
    fn clamped_row(&self, y: f64) -> usize {
        match self.y_scale.project(y) {
            Some(y) => {
                let t = ((y - self.y.0) / (self.y.1 - self.y.0)).clamp(0.0, 1.0);
                (t * (self.height - 1) as f64).round() as usize
            }
            None => 0,
        }
    }

    /// Data coordinates of a cell center
    fn center(&self, col: usize, row: usize) -> (f64, f64) {
        let unproject = |t: f64, range: Range, scale: Scale| {
            let v = range.0 + t * (range.1 - range.0);
            match scale {
                Scale::Linear => v,
                Scale::Log => 10f64.powf(v),
            }
        };
        let tx = col as f64 / (self.width - 1).max(1) as f64;
        let ty = row as f64 / (self.height - 1).max(1) as f64;
        (
            unproject(tx, self.x, self.x_scale),
            unproject(ty, self.y, self.y_scale),
        )
    }

    fn put(&mut self, col: usize, row: usize, glyph: char) {
        if col < self.width && row < self.height {
            self.cells[row][col] = glyph;
        }
    }

    fn point(&mut self, x: f64, y: f64, glyph: char) {
        if let (Some(col), Some(row)) = (self.col(x), self.row(y)) {
            self.put(col, row, glyph);
        }
    }

    /// Straight segment between two visible points
    fn segment(&mut self, from: (f64, f64), to: (f64, f64), glyph: char) {
        let (Some(c0), Some(r0), Some(c1), Some(r1)) = (
            self.col(from.0),
            self.row(from.1),
            self.col(to.0),
            self.row(to.1),
        ) else {
            return;
        };
        let steps = c0.abs_diff(c1).max(r0.abs_diff(r1)).max(1);
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let col = (c0 as f64 + t * (c1 as f64 - c0 as f64)).round() as usize;
            let row = (r0 as f64 + t * (r1 as f64 - r0 as f64)).round() as usize;
            if self.cells[row][col] == ' ' {
                self.put(col, row, '.');
            }
        }
        self.put(c0, r0, glyph);
        self.put(c1, r1, glyph);
    }

    fn column(&mut self, col: usize, from: usize, to: usize, glyph: char) {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        for row in lo..=hi {
            self.put(col, row, glyph);
        }
    }
}

impl Chart for AxesPreview<'_> {
    fn render(&self) -> String {
        let axes = self.axes;
        let width = self.config.width.max(8);
        let height = self.config.height.max(4);
        let three_d = axes.projection() == Projection::ThreeD;
        let (x_scale, y_scale) = if three_d {
            (Scale::Linear, Scale::Linear)
        } else {
            (axes.x_scale(), axes.y_scale())
        };

        let mut canvas = Canvas {
            cells: vec![vec![' '; width]; height],
            width,
            height,
            x: x_scale.project_range(axes.x_lim()),
            y: y_scale.project_range(axes.y_lim()),
            x_scale,
            y_scale,
        };

        for (i, artist) in axes.artists().iter().enumerate() {
            draw_artist(&mut canvas, artist, GLYPHS[i % GLYPHS.len()], axes.z_lim());
        }

        let mut output = String::new();
        if !axes.title().is_empty() {
            output.push_str(&format!("{:^width$}\n\n", axes.title(), width = width + 10));
        }
        if self.config.show_labels {
            output.push_str(&format!("{}\n", axes.y_label()));
        }

        let y_label_rows = [height - 1, height / 2, 0];
        for row in (0..height).rev() {
            if self.config.show_labels {
                if y_label_rows.contains(&row) {
                    let (_, y) = canvas.center(0, row);
                    let value = match y_scale {
                        Scale::Linear => TickFormat::Plain.format(y),
                        Scale::Log => crate::axes::format_number(y),
                    };
                    output.push_str(&format!("{:>8} │", value));
                } else {
                    output.push_str("         │");
                }
            }
            output.extend(canvas.cells[row].iter());
            output.push('\n');
        }

        if self.config.show_labels {
            output.push_str("         └");
            output.push_str(&"─".repeat(width));
            output.push('\n');
            output.push_str(&self.x_axis_labels(&canvas));
            output.push_str(&format!("{:>width$}\n", axes.x_label(), width = width + 10));
            if three_d {
                output.push_str(&format!("          (top view, shaded by {})\n", axes.z_label()));
            }
        }

        if let Some(legend) = axes.legend_box() {
            for (i, entry) in legend.entries.iter().enumerate() {
                let glyph = legend_glyph(axes, i);
                output.push_str(&format!("          {} {}\n", glyph, entry));
            }
        }

        if let Some(bar) = axes.color_bar() {
            let shades: String = (0..bar.levels.len().saturating_sub(1))
                .map(|k| shade(k, bar.levels.len() - 1))
                .collect();
            output.push_str(&format!(
                "          {}: {} {} {}\n",
                bar.label,
                TickFormat::Plain.format(bar.vmin),
                shades,
                TickFormat::Plain.format(bar.vmax)
            ));
        }

        output
    }
}

impl AxesPreview<'_> {
    fn x_axis_labels(&self, canvas: &Canvas) -> String {
        let width = canvas.width;
        match self.axes.x_ticks() {
            Some(ticks) => {
                let mut line = vec![' '; width + 10];
                for (position, label) in ticks {
                    if let Some(col) = canvas.col(*position) {
                        let start = (col + 10).saturating_sub(label.chars().count() / 2);
                        for (offset, ch) in label.chars().enumerate() {
                            if let Some(cell) = line.get_mut(start + offset) {
                                *cell = ch;
                            }
                        }
                    }
                }
                let mut text: String = line.into_iter().collect();
                text.truncate(text.trim_end().len());
                text.push('\n');
                text
            }
            None => {
                let (lo, _) = canvas.center(0, 0);
                let (hi, _) = canvas.center(width - 1, 0);
                let format = if canvas.x_scale == Scale::Log {
                    TickFormat::Plain
                } else {
                    self.axes.x_tick_format().clone()
                };
                let left = format.format(lo);
                let right = format.format(hi);
                format!(
                    "          {:<pad$}{}\n",
                    left,
                    right,
                    pad = width.saturating_sub(right.len())
                )
            }
        }
    }
}

fn shade(k: usize, bands: usize) -> char {
    let t = if bands <= 1 {
        0.5
    } else {
        k as f64 / (bands - 1) as f64
    };
    SHADES[(t * (SHADES.len() - 1) as f64).round() as usize]
}

/// Marker of the `entry`-th legend entry, matching the artist it names
fn legend_glyph(axes: &Axes, entry: usize) -> char {
    axes.artists()
        .iter()
        .enumerate()
        .filter(|(_, artist)| artist.label().is_some())
        .nth(entry)
        .map(|(i, _)| GLYPHS[i % GLYPHS.len()])
        .unwrap_or('?')
}

fn draw_artist(canvas: &mut Canvas, artist: &Artist, glyph: char, z_lim: Range) {
    match artist {
        Artist::Line { x, y, .. } => draw_polyline(canvas, x, y, glyph),
        Artist::ErrorBar {
            x, y, x_err, y_err, ..
        } => {
            for (i, (&xv, &yv)) in x.iter().zip(y).enumerate() {
                let ye = y_err.get(i).copied().unwrap_or(0.0).abs();
                let xe = x_err.get(i).copied().unwrap_or(0.0).abs();
                if ye > 0.0 {
                    if let Some(col) = canvas.col(xv) {
                        let (lo, hi) = (canvas.clamped_row(yv - ye), canvas.clamped_row(yv + ye));
                        canvas.column(col, lo, hi, '|');
                    }
                }
                if xe > 0.0 {
                    if let Some(row) = canvas.row(yv) {
                        for col in [canvas.col(xv - xe), canvas.col(xv + xe)].into_iter().flatten() {
                            canvas.put(col, row, '-');
                        }
                    }
                }
            }
            draw_polyline(canvas, x, y, glyph);
        }
        Artist::Histogram { bins, .. } => {
            for (edge, &height) in bins.edges.windows(2).zip(&bins.heights) {
                draw_block(canvas, edge[0], edge[1], height, glyph);
            }
        }
        Artist::Bars {
            positions,
            heights,
            width,
            ..
        } => {
            for (&p, &h) in positions.iter().zip(heights) {
                draw_block(canvas, p - width / 2.0, p + width / 2.0, h, glyph);
            }
        }
        Artist::Scatter3D { x, y, .. } => {
            for (&xv, &yv) in x.iter().zip(y) {
                canvas.point(xv, yv, glyph);
            }
        }
        Artist::TriSurface {
            x, y, z, triangles, ..
        } => {
            let (lo, hi) = span(z.iter().copied(), false).unwrap_or(z_lim);
            let levels: Vec<f64> = (0..=SHADES.len())
                .map(|i| lo + (hi - lo) * i as f64 / SHADES.len() as f64)
                .collect();
            fill_field(canvas, x, y, z, triangles, &levels);
        }
        Artist::FilledContour {
            x,
            y,
            z,
            triangles,
            levels,
            ..
        } => fill_field(canvas, x, y, z, triangles, levels),
    }
}

fn draw_polyline(canvas: &mut Canvas, x: &[f64], y: &[f64], glyph: char) {
    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    for pair in points.windows(2) {
        canvas.segment(pair[0], pair[1], glyph);
    }
    for &(xv, yv) in &points {
        canvas.point(xv, yv, glyph);
    }
}

fn draw_block(canvas: &mut Canvas, left: f64, right: f64, height: f64, glyph: char) {
    if height == 0.0 {
        return;
    }
    let (Some(c0), Some(c1)) = (canvas.col(left), canvas.col(right)) else {
        return;
    };
    let base = canvas.clamped_row(0.0);
    let top = canvas.clamped_row(height);
    for col in c0.min(c1)..=c0.max(c1) {
        canvas.column(col, base, top, glyph);
    }
}

fn fill_field(
    canvas: &mut Canvas,
    x: &[f64],
    y: &[f64],
    z: &[f64],
    triangles: &[[usize; 3]],
    levels: &[f64],
) {
    let bands = levels.len().saturating_sub(1);
    for row in 0..canvas.height {
        for col in 0..canvas.width {
            let (px, py) = canvas.center(col, row);
            if let Some(value) = interpolate(x, y, z, triangles, px, py) {
                canvas.put(col, row, shade(band_index(value, levels), bands));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Colormap;
    use crate::spec::{LegendLocation, LineStyle};

    #[test]
    fn test_line_preview() {
        let mut axes = Axes::new_2d();
        axes.plot(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0], LineStyle::Solid, "squares");
        axes.set_title("growth");
        axes.legend(LegendLocation::UpperRight);
        let text = AxesPreview::new(&axes).render();
        assert!(text.contains("growth"));
        assert!(text.contains("* squares"));
        assert!(text.contains('*'));
    }

    #[test]
    fn test_bar_ticks_are_printed() {
        let mut axes = Axes::new_2d();
        axes.bar(&[0.0, 1.0], &[2.0, 3.0], 0.8, &[0.0, 0.0], 3.0, "counts");
        axes.set_xticks(&[0.0, 1.0], &["left".to_string(), "right".to_string()]);
        let text = AxesPreview::new(&axes).render();
        assert!(text.contains("left"));
        assert!(text.contains("right"));
    }

    #[test]
    fn test_contour_preview_has_color_bar() {
        let mut axes = Axes::new_2d();
        axes.tricontourf(
            &[0.0, 1.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[0.0, 1.0, 1.0, 2.0],
            4,
            Colormap::RdYlBu,
            0.0,
            2.0,
        );
        axes.colorbar("height").unwrap();
        let text = AxesPreview::new(&axes).render();
        assert!(text.contains("height:"));
        assert!(text.contains('@'));
    }

    #[test]
    fn test_shades_span_range() {
        assert_eq!(shade(0, 5), '.');
        assert_eq!(shade(4, 5), '@');
        assert_eq!(shade(0, 1), '+');
    }
}
