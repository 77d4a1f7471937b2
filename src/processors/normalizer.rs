use tracing::{debug, warn};

use crate::models::{OverpassElement, OverpassResponse, PointRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    pub total_elements: usize,
    pub node_elements: usize,
    pub emitted_records: usize,
    pub missing_coordinates: usize,
    pub out_of_range: usize,
}

impl NormalizationReport {
    pub fn skipped_elements(&self) -> usize {
        self.total_elements - self.node_elements
    }

    pub fn dropped_nodes(&self) -> usize {
        self.missing_coordinates + self.out_of_range
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Elements: {} total, {} nodes, {} other\nRecords: {}",
            self.total_elements,
            self.node_elements,
            self.skipped_elements(),
            self.emitted_records
        );

        if self.dropped_nodes() > 0 {
            summary.push_str(&format!(
                "\nDropped nodes: {} without coordinates, {} out of range",
                self.missing_coordinates, self.out_of_range
            ));
        }

        summary
    }
}

/// Maps heterogeneous Overpass elements onto [`PointRecord`]s.
///
/// Only `node` elements survive. A node without tags gets an empty map; a
/// node without usable coordinates is dropped and counted.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, response: OverpassResponse) -> Vec<PointRecord> {
        self.normalize_with_report(response.elements).0
    }

    pub fn normalize_with_report(
        &self,
        elements: Vec<OverpassElement>,
    ) -> (Vec<PointRecord>, NormalizationReport) {
        let mut report = NormalizationReport {
            total_elements: elements.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(elements.len());

        for element in elements {
            if !element.is_node() {
                continue;
            }
            report.node_elements += 1;

            let (lat, lon) = match (element.lat, element.lon) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => {
                    warn!(node_id = element.id, "Dropping node without coordinates");
                    report.missing_coordinates += 1;
                    continue;
                }
            };

            match PointRecord::validated(element.id, lat, lon, element.tags.unwrap_or_default()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(node_id = element.id, lat, lon, "Dropping node: {}", e);
                    report.out_of_range += 1;
                }
            }
        }

        report.emitted_records = records.len();
        debug!(
            total = report.total_elements,
            nodes = report.node_elements,
            emitted = report.emitted_records,
            "Normalized Overpass response"
        );

        (records, report)
    }
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
