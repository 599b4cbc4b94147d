use std::fs;
use std::path::Path;

use chrono::Weekday;
use serde::Deserialize;

use crate::domain::opening_hours::{ExpectedShift, OpeningHours};
use crate::domain::shift_model::PresetSlot;
use crate::error::{Result, RotaError};

pub const DATABASE_URL_ENV: &str = "ROTA_DATABASE_URL";

/// One line of the `[[opening_hours]]` table.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OpeningHoursEntry {
    /// `sun`, `Sunday`, `wed`, ...
    pub weekday: String,
    /// Preset code such as `3-6`.
    pub slot: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub venue_name: String,
    /// Replaces the built-in regular hours when present.
    pub opening_hours: Option<Vec<OpeningHoursEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://rota.db".to_string(),
            max_connections: 5,
            venue_name: "The Blue Pig".to_string(),
            opening_hours: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RotaError::Config(e.to_string()))
    }

    /// Defaults, then the file (if any), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            config.database_url = url;
        }
        if config.max_connections == 0 {
            return Err(RotaError::Config("max_connections must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn opening_hours(&self) -> Result<OpeningHours> {
        let Some(entries) = &self.opening_hours else {
            return Ok(OpeningHours::default());
        };

        let mut expected = Vec::with_capacity(entries.len());
        for entry in entries {
            let weekday: Weekday = entry
                .weekday
                .parse()
                .map_err(|_| RotaError::Config(format!("unknown weekday '{}'", entry.weekday)))?;
            let slot = PresetSlot::from_code(&entry.slot)
                .ok_or_else(|| RotaError::Config(format!("unknown shift slot '{}'", entry.slot)))?;
            expected.push(ExpectedShift::new(weekday, slot, entry.role.trim()));
        }
        Ok(OpeningHours::from_entries(expected))
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.opening_hours().unwrap(), OpeningHours::default());
    }

    #[test]
    fn custom_opening_hours_replace_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            venue_name = "The Red Lion"

            [[opening_hours]]
            weekday = "Thursday"
            slot = "6-9"
            role = "Bar Staff"

            [[opening_hours]]
            weekday = "thu"
            slot = "9-11"
            role = "Glass Collecting"
            "#,
        )
        .unwrap();

        let hours = config.opening_hours().unwrap();
        let thursday = hours.expected_for_weekday(Weekday::Thu);
        assert_eq!(thursday.len(), 2);
        assert_eq!(thursday[1].role, "Glass Collecting");
        assert!(hours.expected_for_weekday(Weekday::Sun).is_empty());
        assert_eq!(config.venue_name, "The Red Lion");
    }

    #[test]
    fn bad_slot_is_a_config_error() {
        let config = AppConfig::from_toml_str(
            "[[opening_hours]]\nweekday = \"sun\"\nslot = \"1-2\"\nrole = \"Bar Staff\"\n",
        )
        .unwrap();
        assert!(matches!(config.opening_hours(), Err(RotaError::Config(_))));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"sqlite::memory:\"\nmax_connections = 1").unwrap();
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.max_connections, 1);
    }
}
