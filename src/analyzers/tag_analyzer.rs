use std::collections::HashMap;

use crate::models::PointRecord;
use crate::utils::coordinates::format_location;

/// Tag key to number of records carrying it, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequencyTable {
    entries: Vec<(String, usize)>,
}

impl TagFrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct tag keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, count)| (k.as_str(), *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn detailed_summary(&self) -> String {
        let mut summary = String::from("Node type distribution:");
        for (key, count) in self.iter() {
            summary.push_str(&format!("\n{}: {} nodes", key, count));
        }
        summary
    }
}

pub struct TagAnalyzer;

impl TagAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Count, per tag key, the records that carry it.
    ///
    /// Ties keep the order in which keys were first seen.
    pub fn analyze(&self, records: &[PointRecord]) -> TagFrequencyTable {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for record in records {
            for key in record.tags.keys() {
                match positions.get(key.as_str()) {
                    Some(&idx) => counts[idx].1 += 1,
                    None => {
                        positions.insert(key.as_str(), counts.len());
                        counts.push((key.as_str(), 1));
                    }
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        TagFrequencyTable {
            entries: counts
                .into_iter()
                .map(|(key, count)| (key.to_string(), count))
                .collect(),
        }
    }

    pub fn preview<'a>(&self, records: &'a [PointRecord], limit: usize) -> &'a [PointRecord] {
        &records[..limit.min(records.len())]
    }

    pub fn sample_summary(&self, records: &[PointRecord], limit: usize) -> String {
        let mut summary = String::from("Sample nodes:");
        for record in self.preview(records, limit) {
            summary.push_str(&format!(
                "\n\nNode {}:\nLocation: {}\nTags: {:?}",
                record.id,
                format_location(record.lat, record.lon),
                record.tags
            ));
        }
        summary
    }
}

impl Default for TagAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
