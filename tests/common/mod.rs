//! Shared helpers for the integration tests
//!
//! Temporary paths with cleanup on drop, plus small plot fixtures.

#![allow(dead_code, unused_imports)]

pub mod test_utils;

pub use test_utils::{
    line_fixture, read_csv_rows, sample_field, test_temp_path, TempTestDir, TempTestFile,
};
