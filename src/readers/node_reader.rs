use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::warn;
use validator::Validate;

use crate::error::Result;
use crate::models::PointRecord;

/// Reads the JSON array produced by [`crate::writers::JsonWriter`].
pub struct NodeReader {
    strict: bool,
}

impl NodeReader {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// In strict mode a record with out-of-range coordinates fails the read
    /// instead of being skipped.
    pub fn with_strict_validation(strict: bool) -> Self {
        Self { strict }
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<PointRecord>> {
        let reader = BufReader::new(File::open(path)?);
        let records: Vec<PointRecord> = serde_json::from_reader(reader)?;

        let mut valid = Vec::with_capacity(records.len());
        for record in records {
            match record.validate() {
                Ok(()) => valid.push(record),
                Err(e) if self.strict => return Err(e.into()),
                Err(e) => warn!(node_id = record.id, "Skipping invalid record: {}", e),
            }
        }

        Ok(valid)
    }
}

impl Default for NodeReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurveyError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BODY: &str = r#"[
        {"id": 1, "lat": 42.73, "lon": -73.69, "tags": {"amenity": "cafe"}, "type": "node"},
        {"id": 2, "lat": 120.0, "lon": -73.69, "tags": {}, "type": "node"},
        {"id": 3, "lat": 42.74, "lon": -73.68, "type": "node"}
    ]"#;

    #[test]
    fn test_read_skips_invalid() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", BODY)?;

        let records = NodeReader::new().read_records(temp_file.path())?;

        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(records[1].tags.is_empty());
        Ok(())
    }

    #[test]
    fn test_strict_read_fails_on_invalid() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "{}", BODY)?;

        let err = NodeReader::with_strict_validation(true)
            .read_records(temp_file.path())
            .unwrap_err();
        assert!(matches!(err, SurveyError::Validation(_)));
        Ok(())
    }

    #[test]
    fn test_malformed_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "not json")?;

        let err = NodeReader::new().read_records(temp_file.path()).unwrap_err();
        assert!(matches!(err, SurveyError::Json(_)));
        Ok(())
    }
}
