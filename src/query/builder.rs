use std::fmt::Write;

use crate::settings::AreaSettings;
use crate::utils::constants::{
    DEFAULT_AREA_HANDLE, DEFAULT_AREA_NAME, DEFAULT_AREA_PLACE, DEFAULT_AREA_STATE,
    DEFAULT_NODE_FILTERS,
};

/// A single `node[...]` tag selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub value: Option<String>,
}

impl TagFilter {
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Render as a node statement restricted to the named area set.
    pub fn node_clause(&self, area_handle: &str) -> String {
        match &self.value {
            Some(value) => format!(r#"node["{}"="{}"](area.{});"#, self.key, value, area_handle),
            None => format!(r#"node["{}"](area.{});"#, self.key, area_handle),
        }
    }
}

/// The six selectors used when no feature type is requested.
pub fn default_filters() -> Vec<TagFilter> {
    DEFAULT_NODE_FILTERS
        .iter()
        .map(|(key, value)| match value {
            Some(value) => TagFilter::key_value(*key, *value),
            None => TagFilter::key(*key),
        })
        .collect()
}

/// Builds Overpass QL selecting point features inside a named city/state area.
///
/// The generated query resolves the area into a named set, unions the node
/// selectors, then asks for full bodies followed by the recursed-down
/// skeleton (`>; out skel qt;`).
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    area: AreaSettings,
    timeout_secs: Option<u64>,
}

impl QueryBuilder {
    pub fn new(area: AreaSettings) -> Self {
        Self {
            area,
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn area(&self) -> &AreaSettings {
        &self.area
    }

    /// The node selectors a query for `node_type` would contain.
    ///
    /// The filter string is passed through verbatim; the interpreter rejects
    /// anything malformed.
    pub fn filters(&self, node_type: Option<&str>) -> Vec<TagFilter> {
        match node_type {
            Some(node_type) => vec![TagFilter::key(node_type)],
            None => default_filters(),
        }
    }

    pub fn build(&self, node_type: Option<&str>) -> String {
        let handle = &self.area.handle;
        let mut query = String::new();

        query.push_str("[out:json]");
        if let Some(timeout) = self.timeout_secs {
            let _ = write!(query, "[timeout:{}]", timeout);
        }
        query.push_str(";\n");

        let _ = writeln!(
            query,
            r#"area["name"="{}"]["place"="{}"]["state"="{}"]->.{};"#,
            self.area.name, self.area.place, self.area.state, handle
        );

        query.push_str("(\n");
        for filter in self.filters(node_type) {
            let _ = writeln!(query, "  {}", filter.node_clause(handle));
        }
        query.push_str(");\n");
        query.push_str("out body;\n>;\nout skel qt;\n");

        query
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(AreaSettings {
            name: DEFAULT_AREA_NAME.to_string(),
            place: DEFAULT_AREA_PLACE.to_string(),
            state: DEFAULT_AREA_STATE.to_string(),
            handle: DEFAULT_AREA_HANDLE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clause_count(query: &str) -> usize {
        query.matches("node[").count()
    }

    #[test]
    fn test_default_query_has_six_filters() {
        let query = QueryBuilder::default().build(None);

        assert_eq!(clause_count(&query), 6);
        assert!(query.contains(r#"node["highway"="bus_stop"](area.troy);"#));
        assert!(query.contains(r#"node["tourism"](area.troy);"#));
    }

    #[test]
    fn test_single_filter() {
        let query = QueryBuilder::default().build(Some("amenity"));

        assert_eq!(clause_count(&query), 1);
        assert!(query.contains(r#"node["amenity"](area.troy);"#));
    }

    #[test]
    fn test_full_query_text() {
        let query = QueryBuilder::default().with_timeout(25).build(Some("shop"));

        let expected = concat!(
            "[out:json][timeout:25];\n",
            "area[\"name\"=\"Troy\"][\"place\"=\"city\"][\"state\"=\"New York\"]->.troy;\n",
            "(\n",
            "  node[\"shop\"](area.troy);\n",
            ");\n",
            "out body;\n",
            ">;\n",
            "out skel qt;\n",
        );
        assert_eq!(query, expected);
    }

    #[test]
    fn test_malformed_filter_passes_through() {
        let query = QueryBuilder::default().build(Some(r#"amenity"]["x"#));
        assert!(query.contains(r#"node["amenity"]["x"](area.troy);"#));
        assert_eq!(clause_count(&query), 1);
    }

    #[test]
    fn test_custom_area() {
        let builder = QueryBuilder::new(AreaSettings {
            name: "Albany".to_string(),
            place: "city".to_string(),
            state: "New York".to_string(),
            handle: "albany".to_string(),
        });

        let query = builder.build(None);
        assert!(query.contains(r#"area["name"="Albany"]"#));
        assert!(query.contains("->.albany;"));
        assert!(query.contains("(area.albany);"));
        assert!(!query.contains("timeout"));
    }
}
