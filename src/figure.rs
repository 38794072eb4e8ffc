//! Figure orchestration.
//!
//! [`render`] lays one or more specifications out on a subplot grid, renders each into
//! its own [`Axes`], adds legends and aspect ratios, and then saves and/or shows the
//! finished [`Figure`].

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::axes::{Axes, Projection};
use crate::backend;
use crate::config::FigureConfig;
use crate::error::{Error, Result};
use crate::render::render_spec;
use crate::spec::{PlotKind, PlotSpec};

/// Number of subplot rows and columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        GridShape { rows, cols }
    }

    /// One column with one row per subplot
    pub fn column(n: usize) -> Self {
        GridShape { rows: n, cols: 1 }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// `(row, col)` of the `index`-th cell in row-major order
    pub fn position(&self, index: usize) -> (usize, usize) {
        let cols = self.cols.max(1);
        (index / cols, index % cols)
    }
}

/// How a figure is laid out and where it goes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Subplot grid; one column with a row per specification when `None`
    pub grid: Option<GridShape>,
    /// Per-subplot aspect overrides, used only when there is one per specification
    pub aspects: Option<Vec<f64>>,
    pub save: bool,
    pub image_path: Option<PathBuf>,
    pub show: bool,
    pub config: FigureConfig,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            grid: None,
            aspects: None,
            save: false,
            image_path: None,
            show: false,
            config: FigureConfig::default(),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = Some(GridShape::new(rows, cols));
        self
    }

    pub fn with_aspects(mut self, aspects: Vec<f64>) -> Self {
        self.aspects = Some(aspects);
        self
    }

    /// Save the image to `path` (`.png` or `.svg`)
    pub fn with_image<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.image_path = Some(path.into());
        self.save = true;
        self
    }

    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    pub fn with_config(mut self, config: FigureConfig) -> Self {
        self.config = config;
        self
    }
}

/// One or more specifications to lay out on a figure
#[derive(Debug, Clone, PartialEq)]
pub struct Plots(Vec<PlotSpec>);

impl Plots {
    pub fn specs(&self) -> &[PlotSpec] {
        &self.0
    }

    pub fn into_specs(self) -> Vec<PlotSpec> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<PlotSpec> for Plots {
    fn from(spec: PlotSpec) -> Self {
        Plots(vec![spec])
    }
}

impl From<&PlotSpec> for Plots {
    fn from(spec: &PlotSpec) -> Self {
        Plots(vec![spec.clone()])
    }
}

impl From<Vec<PlotSpec>> for Plots {
    fn from(specs: Vec<PlotSpec>) -> Self {
        Plots(specs)
    }
}

impl From<&[PlotSpec]> for Plots {
    fn from(specs: &[PlotSpec]) -> Self {
        Plots(specs.to_vec())
    }
}

/// A laid-out figure that owns its subplots
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    grid: GridShape,
    axes: Vec<Axes>,
    tight: bool,
    config: FigureConfig,
}

impl Figure {
    pub fn new(grid: GridShape, config: FigureConfig) -> Self {
        Figure {
            grid,
            axes: Vec::new(),
            tight: false,
            config,
        }
    }

    /// Allocate the next grid cell
    pub fn add_subplot(&mut self, projection: Projection) -> Result<Axes> {
        if self.axes.len() >= self.grid.cells() {
            return Err(Error::InvalidValue(format!(
                "a {}x{} grid has no room for subplot {}",
                self.grid.rows,
                self.grid.cols,
                self.axes.len() + 1
            )));
        }
        Ok(Axes::new(projection))
    }

    fn push(&mut self, axes: Axes) {
        self.axes.push(axes);
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Whether the layout was tightened
    pub fn is_tight(&self) -> bool {
        self.tight
    }

    pub fn tight_layout(&mut self) {
        self.tight = true;
    }

    /// Pixel size of the whole figure
    pub fn pixel_size(&self) -> Result<(u32, u32)> {
        pixel_size(self.grid, &self.config)
    }

    /// Write the figure as PNG or SVG, chosen by the extension of `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        backend::save_figure(self, path)?;
        info!("saved figure to {}", path.display());
        Ok(())
    }

    /// Terminal preview of every subplot
    pub fn preview(&self) -> String {
        backend::preview(self)
    }

    pub fn show(&self) {
        println!("{}", self.preview());
    }
}

/// Pixel size of a `grid` of cells sized by `config`; fails when it does not fit in `u32`
pub fn pixel_size(grid: GridShape, config: &FigureConfig) -> Result<(u32, u32)> {
    let scale = |cells: usize, cell_px: u32| {
        u32::try_from(cells.max(1))
            .ok()
            .and_then(|cells| cell_px.checked_mul(cells))
    };
    match (scale(grid.cols, config.width), scale(grid.rows, config.height)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(Error::InvalidValue(format!(
            "a {}x{} grid of {}x{} pixel cells is too large to draw",
            grid.rows, grid.cols, config.width, config.height
        ))),
    }
}

/// Aspect ratio that makes the plot box `factor` times as tall as it is wide
fn box_aspect(axes: &Axes, factor: f64) -> Option<f64> {
    let (x0, x1) = axes.x_lim();
    let (y0, y1) = axes.y_lim();
    let y_span = y1 - y0;
    if y_span == 0.0 {
        return None;
    }
    Some(((x1 - x0) / y_span).abs() * factor)
}

/// Lay out, render and finalize one figure.
///
/// With `save`, `image_path` must be a non-empty UTF-8 path ending in `.png` or
/// `.svg`; this is checked before anything is drawn.
pub fn render(plots: impl Into<Plots>, options: &RenderOptions) -> Result<Figure> {
    let plots = plots.into();
    let specs = plots.specs();
    let n = specs.len();
    if n == 0 {
        return Err(Error::InvalidDataShape("nothing to plot".to_string()));
    }

    let destination = if options.save {
        Some(backend::validate_destination(options.image_path.as_deref())?)
    } else {
        None
    };

    let grid = options.grid.unwrap_or_else(|| GridShape::column(n));
    if grid.cells() < n {
        return Err(Error::InvalidValue(format!(
            "{} plots do not fit on a {}x{} grid",
            n, grid.rows, grid.cols
        )));
    }
    if destination.is_some() {
        pixel_size(grid, &options.config)?;
    }

    let aspects = options.aspects.as_deref().filter(|aspects| aspects.len() >= n);

    let mut figure = Figure::new(grid, options.config.clone());
    for (i, spec) in specs.iter().enumerate() {
        let kind = spec.kind();
        let projection = if kind.is_3d() {
            Projection::ThreeD
        } else {
            Projection::Rectilinear
        };
        let axes = figure.add_subplot(projection)?;
        let mut axes = render_spec(spec, axes)?;
        debug!("rendered {} subplot {} of {}", kind, i + 1, n);

        if spec.options.legend && kind != PlotKind::ContourMap {
            axes.legend(spec.options.legend_location);
        }

        let factor = aspects.map(|aspects| aspects[i]).unwrap_or(1.0);
        match box_aspect(&axes, factor) {
            Some(aspect) => axes.set_aspect(aspect),
            None => warn!("subplot {} has a zero y span, aspect left unset", i + 1),
        }

        figure.push(axes);
    }
    figure.tight_layout();

    if let Some(path) = destination {
        figure.save(path)?;
    }
    if options.show {
        figure.show();
    }
    Ok(figure)
}
