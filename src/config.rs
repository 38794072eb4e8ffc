//! Figure configuration.
//!
//! Sizes, fonts and colors used when a figure is drawn. Every field has a default,
//! so a TOML file only needs to name the values it changes:
//!
//! ```toml
//! width = 1024
//! font_family = "serif"
//! color_palette = [[0, 0, 0], [200, 30, 30]]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axes::Rgb;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width of one subplot cell in pixels
    pub width: u32,
    /// Height of one subplot cell in pixels
    pub height: u32,
    pub font_family: String,
    pub title_font_size: u32,
    pub label_font_size: u32,
    /// Series colors, cycled per subplot
    pub color_palette: Vec<Rgb>,
    /// Terminal preview size in characters
    pub preview_width: usize,
    pub preview_height: usize,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            width: 800,
            height: 600,
            font_family: "sans-serif".to_string(),
            title_font_size: 20,
            label_font_size: 14,
            color_palette: vec![
                (0, 123, 255),  // blue
                (255, 99, 71),  // red
                (46, 204, 113), // green
                (255, 193, 7),  // yellow
                (142, 68, 173), // purple
                (52, 152, 219), // light blue
                (243, 156, 18), // orange
                (211, 84, 0),   // brown
            ],
            preview_width: 60,
            preview_height: 16,
        }
    }
}

impl FigureConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: FigureConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration from a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Color of the `index`-th series, cycling through the palette
    pub fn series_color(&self, index: usize) -> Rgb {
        if self.color_palette.is_empty() {
            return (0, 0, 0);
        }
        self.color_palette[index % self.color_palette.len()]
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "figure size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.preview_width < 8 || self.preview_height < 4 {
            return Err(Error::Config(format!(
                "preview size {}x{} is too small",
                self.preview_width, self.preview_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FigureConfig::from_toml_str("width = 1024\nfont_family = \"serif\"").unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.font_family, "serif");
        assert_eq!(config.color_palette.len(), 8);
    }

    #[test]
    fn test_palette_from_toml() {
        let config = FigureConfig::from_toml_str("color_palette = [[1, 2, 3]]").unwrap();
        assert_eq!(config.series_color(0), (1, 2, 3));
        assert_eq!(config.series_color(5), (1, 2, 3));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            FigureConfig::from_toml_str("width = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            FigureConfig::from_toml_str("width = \"wide\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.toml");
        fs::write(&path, "height = 480\npreview_width = 40\n").unwrap();
        let config = FigureConfig::from_path(&path).unwrap();
        assert_eq!(config.height, 480);
        assert_eq!(config.preview_width, 40);

        assert!(matches!(
            FigureConfig::from_path(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }
}
