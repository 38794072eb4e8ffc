//! Output backends for finished figures.
//!
//! - [`drawing`]: PNG and SVG images through `plotters`
//! - [`terminal`]: character previews used by "show"

pub mod drawing;
pub mod terminal;

use std::path::Path;

use crate::error::{Error, Result};

pub use drawing::save_figure;
pub use terminal::{preview, AxesPreview, Chart, ChartConfig};

/// Image file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => Err(Error::InvalidDestination(format!(
                "'{}' does not end in .png or .svg",
                path.display()
            ))),
        }
    }
}

/// Check that an image destination is usable before anything is drawn
pub fn validate_destination(path: Option<&Path>) -> Result<&Path> {
    let path = path.ok_or_else(|| Error::InvalidDestination("no image path given".to_string()))?;
    let text = path.to_str().ok_or_else(|| {
        Error::InvalidDestination(format!("'{}' is not valid UTF-8", path.display()))
    })?;
    if text.trim().is_empty() {
        return Err(Error::InvalidDestination("image path is empty".to_string()));
    }
    ImageFormat::from_path(path)?;
    Ok(path)
}
