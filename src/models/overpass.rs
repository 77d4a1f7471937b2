use indexmap::IndexMap;
use serde::Deserialize;

use crate::utils::constants::ELEMENT_TYPE_NODE;

/// Decoded body of an Overpass interpreter reply. Only `elements` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,

    #[serde(default)]
    pub remark: Option<String>,
}

/// One heterogeneous element: node, way, relation, or the skeleton rows of `out skel`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub tags: Option<IndexMap<String, String>>,
}

impl OverpassElement {
    pub fn is_node(&self) -> bool {
        self.element_type == ELEMENT_TYPE_NODE
    }
}
