pub mod csv_writer;
pub mod json_writer;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use csv_writer::CsvWriter;
pub use json_writer::JsonWriter;

#[derive(Debug)]
pub struct OutputFileInfo {
    pub format: &'static str,
    pub path: PathBuf,
    pub rows: usize,
    pub file_size: u64,
}

impl OutputFileInfo {
    pub fn from_path(format: &'static str, path: &Path, rows: usize) -> Result<Self> {
        let file_size = std::fs::metadata(path)?.len();
        Ok(Self {
            format,
            path: path.to_path_buf(),
            rows,
            file_size,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} File Summary:\n\
            - Path: {}\n\
            - Rows: {}\n\
            - File size: {:.1} KB",
            self.format,
            self.path.display(),
            self.rows,
            self.file_size as f64 / 1024.0
        )
    }
}
