use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::PointRecord;
use crate::writers::OutputFileInfo;

/// Writes records as a JSON array of `{id, lat, lon, tags, type}` objects.
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn write_records(&self, records: &[PointRecord], path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, records)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writer.flush()?;

        Ok(())
    }

    pub fn get_file_info(&self, path: &Path, rows: usize) -> Result<OutputFileInfo> {
        OutputFileInfo::from_path("JSON", path, rows)
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
