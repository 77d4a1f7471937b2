use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::models::PointRecord;
use crate::utils::constants::CSV_BASE_COLUMNS;
use crate::writers::OutputFileInfo;

/// Flattens records into `id, lat, lon` followed by one column per observed tag key.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Union of tag keys across records, in first-seen order.
    pub fn tag_columns(&self, records: &[PointRecord]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for record in records {
            for key in record.tags.keys() {
                if seen.insert(key.as_str()) {
                    columns.push(key.clone());
                }
            }
        }

        columns
    }

    pub fn write_records(&self, records: &[PointRecord], path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        let tag_columns = self.tag_columns(records);

        let header = CSV_BASE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(header_names(&tag_columns));
        writer.write_record(header)?;

        for record in records {
            let mut row = vec![
                record.id.to_string(),
                record.lat.to_string(),
                record.lon.to_string(),
            ];
            row.extend(
                tag_columns
                    .iter()
                    .map(|key| record.tags.get(key).cloned().unwrap_or_default()),
            );
            writer.write_record(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn get_file_info(&self, path: &Path, rows: usize) -> Result<OutputFileInfo> {
        OutputFileInfo::from_path("CSV", path, rows)
    }
}

/// Header cells for the tag columns.
///
/// A key that shadows a fixed column or an earlier header gets `tag:`
/// prefixes until it is unique.
fn header_names(tag_columns: &[String]) -> Vec<String> {
    let mut used: HashSet<String> = CSV_BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut names = Vec::with_capacity(tag_columns.len());

    for key in tag_columns {
        let mut name = key.clone();
        while used.contains(&name) {
            name = format!("tag:{}", name);
        }
        used.insert(name.clone());
        names.push(name);
    }

    names
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OverpassResponse;
    use crate::processors::ResponseNormalizer;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn record(id: i64, tags: &[(&str, &str)]) -> PointRecord {
        let tags = tags
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<IndexMap<_, _>>();
        PointRecord::new(id, 42.5, -73.25, tags)
    }

    #[test]
    fn test_union_columns_with_blanks() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let records = vec![
            record(1, &[("amenity", "cafe")]),
            record(2, &[("amenity", "bar"), ("name", "Ale House")]),
            record(3, &[]),
        ];

        CsvWriter::new().write_records(&records, temp_file.path())?;

        let contents = std::fs::read_to_string(temp_file.path())?;
        assert_eq!(
            contents,
            "id,lat,lon,amenity,name\n\
             1,42.5,-73.25,cafe,\n\
             2,42.5,-73.25,bar,Ale House\n\
             3,42.5,-73.25,,\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_records_write_header_only() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        CsvWriter::new().write_records(&[], temp_file.path())?;

        assert_eq!(std::fs::read_to_string(temp_file.path())?, "id,lat,lon\n");
        Ok(())
    }

    #[test]
    fn test_shadowing_tag_key() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        CsvWriter::new().write_records(&[record(9, &[("id", "x")])], temp_file.path())?;

        let contents = std::fs::read_to_string(temp_file.path())?;
        assert!(contents.starts_with("id,lat,lon,tag:id\n9,"));
        Ok(())
    }

    #[test]
    fn test_prefixed_headers_stay_unique() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let records = vec![record(1, &[("id", "x"), ("tag:id", "y"), ("lat", "z")])];
        CsvWriter::new().write_records(&records, temp_file.path())?;

        let contents = std::fs::read_to_string(temp_file.path())?;
        let header = contents.lines().next().unwrap_or_default();
        assert_eq!(header, "id,lat,lon,tag:id,tag:tag:id,tag:lat");
        assert!(contents.ends_with("1,42.5,-73.25,x,y,z\n"));
        Ok(())
    }

    #[test]
    fn test_columns_follow_reply_key_order() -> Result<()> {
        let response: OverpassResponse = serde_json::from_str(
            r#"{"elements": [{"type": "node", "id": 1, "lat": 42.73, "lon": -73.69,
                "tags": {"shop": "bakery", "amenity": "cafe"}}]}"#,
        )?;
        let records = ResponseNormalizer::new().normalize(response);
        let writer = CsvWriter::new();

        assert_eq!(writer.tag_columns(&records), vec!["shop", "amenity"]);

        let temp_file = NamedTempFile::new()?;
        writer.write_records(&records, temp_file.path())?;
        assert_eq!(
            std::fs::read_to_string(temp_file.path())?,
            "id,lat,lon,shop,amenity\n1,42.73,-73.69,bakery,cafe\n"
        );
        Ok(())
    }

    #[test]
    fn test_values_with_commas_are_quoted() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        CsvWriter::new()
            .write_records(&[record(4, &[("name", "Bread, Butter")])], temp_file.path())?;

        let contents = std::fs::read_to_string(temp_file.path())?;
        assert!(contents.ends_with("4,42.5,-73.25,\"Bread, Butter\"\n"));
        Ok(())
    }
}
