use std::path::PathBuf;

use crate::utils::constants::OUTPUT_STEM_SUFFIX;

/// Generate default JSON filename with format: {handle}_nodes.json
pub fn generate_default_json_filename(area_handle: &str) -> PathBuf {
    PathBuf::from(format!("{}{}.json", area_handle, OUTPUT_STEM_SUFFIX))
}

/// Generate default CSV filename with format: {handle}_nodes.csv
pub fn generate_default_csv_filename(area_handle: &str) -> PathBuf {
    PathBuf::from(format!("{}{}.csv", area_handle, OUTPUT_STEM_SUFFIX))
}
