use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;

/// Discriminator carried by every normalized record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    #[default]
    Node,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PointRecord {
    pub id: i64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    #[serde(default)]
    pub tags: IndexMap<String, String>,

    #[serde(rename = "type", default)]
    pub kind: FeatureKind,
}

impl PointRecord {
    pub fn new(id: i64, lat: f64, lon: f64, tags: IndexMap<String, String>) -> Self {
        Self {
            id,
            lat,
            lon,
            tags,
            kind: FeatureKind::Node,
        }
    }

    /// Build a record and reject it if its coordinates fall outside WGS84 bounds.
    pub fn validated(id: i64, lat: f64, lon: f64, tags: IndexMap<String, String>) -> Result<Self> {
        let record = Self::new(id, lat, lon, tags);
        record.validate()?;
        Ok(record)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }
}
