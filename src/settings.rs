use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SurveyError};
use crate::utils::constants::*;

/// Settings layered from defaults, an optional TOML file and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub overpass: OverpassSettings,
    pub output: OutputSettings,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassSettings {
    pub url: String,
    pub timeout_secs: u64,
    pub area: AreaSettings,
}

/// Administrative area resolved by the query's first statement.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaSettings {
    pub name: String,
    pub place: String,
    pub state: String,
    /// Name of the Overpass set the area is stored in.
    pub handle: String,
}

impl AreaSettings {
    /// Overpass set name derived from an area name: "Saratoga Springs" -> "saratoga_springs".
    pub fn handle_for(name: &str) -> String {
        let handle: String = name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect();

        if handle.is_empty() {
            DEFAULT_AREA_HANDLE.to_string()
        } else {
            handle
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub sample_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Settings {
    /// Load settings. An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Self::builder()?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override_option("gemini.api_key", std::env::var(GEMINI_API_KEY_ENV).ok())?
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Built-in defaults only, ignoring files and environment.
    pub fn defaults() -> Result<Self> {
        let settings = Self::builder()?.build()?.try_deserialize::<Settings>()?;
        Ok(settings)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = Config::builder()
            .set_default("overpass.url", DEFAULT_OVERPASS_URL)?
            .set_default("overpass.timeout_secs", DEFAULT_QUERY_TIMEOUT_SECS)?
            .set_default("overpass.area.name", DEFAULT_AREA_NAME)?
            .set_default("overpass.area.place", DEFAULT_AREA_PLACE)?
            .set_default("overpass.area.state", DEFAULT_AREA_STATE)?
            .set_default("overpass.area.handle", DEFAULT_AREA_HANDLE)?
            .set_default("output.sample_size", DEFAULT_SAMPLE_SIZE as u64)?
            .set_default("gemini.url", DEFAULT_GEMINI_URL)?
            .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?;
        Ok(builder)
    }

    fn validate(&self) -> Result<()> {
        if self.overpass.url.trim().is_empty() {
            return Err(SurveyError::Config("overpass.url must not be empty".to_string()));
        }

        let handle = &self.overpass.area.handle;
        if handle.is_empty() || !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(SurveyError::Config(format!(
                "overpass.area.handle '{}' must be a non-empty identifier",
                handle
            )));
        }

        Ok(())
    }

    pub fn json_output(&self) -> PathBuf {
        self.output
            .json
            .clone()
            .unwrap_or_else(|| crate::utils::generate_default_json_filename(&self.overpass.area.handle))
    }

    pub fn csv_output(&self) -> PathBuf {
        self.output
            .csv
            .clone()
            .unwrap_or_else(|| crate::utils::generate_default_csv_filename(&self.overpass.area.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() -> Result<()> {
        let settings = Settings::defaults()?;

        assert_eq!(settings.overpass.url, DEFAULT_OVERPASS_URL);
        assert_eq!(settings.overpass.area.name, "Troy");
        assert_eq!(settings.overpass.area.state, "New York");
        assert_eq!(settings.output.sample_size, 5);
        assert_eq!(settings.json_output(), PathBuf::from("troy_nodes.json"));
        assert_eq!(settings.csv_output(), PathBuf::from("troy_nodes.csv"));
        assert_eq!(settings.gemini.model, "gemini-1.5-flash");
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            "[overpass.area]\nname = \"Albany\"\nhandle = \"albany\"\n\n[output]\nsample_size = 2"
        )?;

        let settings = Settings::load(Some(file.path()))?;
        assert_eq!(settings.overpass.area.name, "Albany");
        assert_eq!(settings.overpass.area.place, "city");
        assert_eq!(settings.output.sample_size, 2);
        assert_eq!(settings.json_output(), PathBuf::from("albany_nodes.json"));
        Ok(())
    }

    #[test]
    fn test_invalid_handle_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[overpass.area]\nhandle = \"bad handle\"")?;

        let err = Settings::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SurveyError::Config(_)));
        Ok(())
    }

    #[test]
    fn test_handle_for() {
        assert_eq!(AreaSettings::handle_for("Saratoga Springs"), "saratoga_springs");
        assert_eq!(AreaSettings::handle_for("Troy"), "troy");
        assert_eq!(AreaSettings::handle_for("  "), "troy");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("no/such/settings.toml"))).is_err());
    }
}
