//! Background rendering.
//!
//! The specifications are cloned into a named background thread, which renders the
//! figure and optionally dumps the series to CSV. Nothing flows back: failures on the
//! thread are logged with `log::error!`. [`RenderHandle::wait`] blocks until the work
//! is done; dropping the handle detaches the thread.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use log::{debug, error};

use crate::error::{Error, Result};
use crate::export::export;
use crate::figure::{render, GridShape, Plots, RenderOptions};
use crate::spec::PlotSpec;

const THREAD_NAME: &str = "simpleplot-render";

/// Handle to a background render
#[derive(Debug)]
pub struct RenderHandle {
    handle: JoinHandle<()>,
}

impl RenderHandle {
    /// Block until the background work has finished
    pub fn wait(self) {
        if self.handle.join().is_err() {
            error!("{} thread panicked", THREAD_NAME);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// CSV destination of every specification: `path` itself for one, `<stem>_<i>.<ext>`
/// for several
pub fn csv_paths(path: &Path, count: usize) -> Vec<PathBuf> {
    if count == 1 {
        return vec![path.to_path_buf()];
    }
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    (0..count)
        .map(|i| {
            let name = match path.extension() {
                Some(ext) => format!("{}_{}.{}", stem, i, ext.to_string_lossy()),
                None => format!("{}_{}", stem, i),
            };
            path.with_file_name(name)
        })
        .collect()
}

fn spawn(plots: Plots, options: RenderOptions, csv_path: Option<PathBuf>) -> Result<RenderHandle> {
    let handle = thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || {
            debug!("rendering {} plot(s) in the background", plots.len());
            if let Err(err) = render(plots.specs(), &options) {
                error!("background render failed: {}", err);
            }
            if let Some(csv_path) = csv_path {
                let paths = csv_paths(&csv_path, plots.len());
                for (spec, path) in plots.specs().iter().zip(paths) {
                    if let Err(err) = export(spec, &path) {
                        error!("CSV export to {} failed: {}", path.display(), err);
                    }
                }
            }
        })
        .map_err(Error::Io)?;
    Ok(RenderHandle { handle })
}

/// Render on a background thread
pub fn plot(plots: impl Into<Plots>, options: RenderOptions) -> Result<RenderHandle> {
    spawn(plots.into(), options, None)
}

/// Render on a background thread and dump every specification to CSV
pub fn plot_and_save<P: AsRef<Path>>(
    plots: impl Into<Plots>,
    options: RenderOptions,
    csv_path: P,
) -> Result<RenderHandle> {
    spawn(plots.into(), options, Some(csv_path.as_ref().to_path_buf()))
}

impl PlotSpec {
    /// Render this plot alone on a 1x1 grid in the background, optionally saving the
    /// image, dumping the series and showing a preview
    pub fn show_and_save(
        &self,
        image_path: Option<&Path>,
        csv_path: Option<&Path>,
        save_image: bool,
        save_csv: bool,
        show: bool,
    ) -> Result<RenderHandle> {
        let options = RenderOptions {
            grid: Some(GridShape::new(1, 1)),
            aspects: Some(vec![1.0]),
            save: save_image,
            image_path: image_path.map(Path::to_path_buf),
            show,
            ..RenderOptions::default()
        };
        if !save_csv {
            return plot(self, options);
        }
        match csv_path {
            Some(path) => plot_and_save(self, options, path),
            None => Err(Error::InvalidDestination("no CSV path given".to_string())),
        }
    }
}
