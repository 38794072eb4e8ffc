//! Temporary file handling and plot fixtures
//!
//! Temporary paths honor TMPDIR, TEMP and TMP and are removed when their guard is
//! dropped.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use simpleplot::{LineSeries, PlotSpec};

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_root() -> PathBuf {
    env::var("TMPDIR")
        .or_else(|_| env::var("TEMP"))
        .or_else(|_| env::var("TMP"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

fn unique_name(prefix: &str, test_name: &str) -> String {
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}_{}", prefix, test_name, std::process::id(), counter)
}

/// Unique path for a temporary test file
pub fn test_temp_path(test_name: &str, extension: &str) -> PathBuf {
    temp_root().join(format!(
        "{}.{}",
        unique_name("simpleplot_test", test_name),
        extension
    ))
}

/// Temporary file removed on drop
pub struct TempTestFile {
    path: PathBuf,
}

impl TempTestFile {
    pub fn new(test_name: &str, extension: &str) -> Self {
        TempTestFile {
            path: test_temp_path(test_name, extension),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Temporary directory removed with its contents on drop
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    pub fn new(test_name: &str) -> std::io::Result<Self> {
        let path = temp_root().join(unique_name("simpleplot_test_dir", test_name));
        fs::create_dir_all(&path)?;
        Ok(TempTestDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

/// Split a CSV dump into rows of raw cells
pub fn read_csv_rows<P: AsRef<Path>>(path: P) -> Vec<Vec<String>> {
    let content = fs::read_to_string(path).expect("Failed to read CSV dump");
    content
        .lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

/// Samples of a smooth field over a 6x6 lattice
pub fn sample_field() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut z = Vec::new();
    for i in 0..6 {
        for j in 0..6 {
            let (px, py) = (i as f64, j as f64);
            x.push(px);
            y.push(py);
            z.push((px * 0.5).sin() + py * 0.25);
        }
    }
    (x, y, z)
}

/// Two labelled line series, the second with vertical error bars
pub fn line_fixture() -> PlotSpec {
    PlotSpec::line(vec![
        LineSeries::new(vec![1.0, 2.0, 3.0], vec![1.0, 4.0, 9.0]).with_label("squares"),
        LineSeries::new(vec![1.0, 2.0, 3.0], vec![2.0, 3.0, 4.0])
            .with_label("linear")
            .with_y_error(0.5),
    ])
    .with_title("Fixture")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_temp_path_unique() {
        let path1 = test_temp_path("test", "csv");
        let path2 = test_temp_path("test", "csv");
        assert_ne!(path1, path2, "Paths should be unique");
    }

    #[test]
    fn test_temp_test_file_cleanup() {
        let path;
        {
            let temp_file = TempTestFile::new("temp_file_test", "txt");
            path = temp_file.path().to_path_buf();
            let mut file = File::create(temp_file.path()).unwrap();
            writeln!(file, "test data").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists(), "File should be deleted on drop");
    }

    #[test]
    fn test_temp_test_dir_cleanup() {
        let path;
        {
            let temp_dir = TempTestDir::new("temp_dir_test").unwrap();
            path = temp_dir.path().to_path_buf();
            File::create(temp_dir.join("inner.txt")).unwrap();
        }
        assert!(!path.exists(), "Directory should be deleted on drop");
    }
}
