//! Application settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use gf_core::{FilterCriteria, GeoCoord, SelectionResolver, REFERENCE_SHOP_NAME};
use gf_data::DatasetConfig;
use gf_views::{MapStyle, DEFAULT_FALLBACK_CENTER};

/// Path of a JSON settings file
pub const CONFIG_ENV: &str = "GARAGE_FINDER_CONFIG";

/// Path of the CSV dataset
pub const DATA_ENV: &str = "GARAGE_FINDER_DATA";

/// Command line of the garage finder
#[derive(Debug, Default, Parser)]
#[command(name = "garage-finder")]
#[command(about = "Find repair garages around Halfords on a map")]
pub struct Cli {
    /// JSON settings file
    #[arg(long, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// CSV dataset, replacing the one named in the settings file
    #[arg(value_name = "CSV", env = DATA_ENV)]
    pub data: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// CSV dataset. The built-in demo data is used when unset.
    pub dataset: Option<DatasetConfig>,
    pub default_criteria: FilterCriteria,
    pub map: MapStyle,
    /// Map center when no point has usable coordinates
    pub fallback_center: GeoCoord,
    pub display: SelectionResolver,
    pub reference_shop: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dataset: None,
            default_criteria: FilterCriteria::default(),
            map: MapStyle::default(),
            fallback_center: DEFAULT_FALLBACK_CENTER,
            display: SelectionResolver::default(),
            reference_shop: REFERENCE_SHOP_NAME.to_string(),
        }
    }
}

impl AppSettings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid settings JSON")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Settings from the parsed command line and environment.
    ///
    /// Layers, later ones overriding earlier ones: defaults, settings file,
    /// dataset path.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        if let Some(path) = &cli.data {
            settings.set_dataset_path(path.clone());
        }

        Ok(settings)
    }

    /// Point the dataset at `path`, keeping any configured column mapping
    pub fn set_dataset_path(&mut self, path: impl Into<PathBuf>) {
        match &mut self.dataset {
            Some(config) => config.path = path.into(),
            None => self.dataset = Some(DatasetConfig::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_views::Basemap;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert!(settings.dataset.is_none());
        assert_eq!(settings.default_criteria, FilterCriteria::default());
        assert_eq!(settings.fallback_center, GeoCoord::new(51.4545, -2.5879));
        assert_eq!(settings.display.prompt, "Click on any Garage");
        assert_eq!(settings.reference_shop, "Halfords Autocentre");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = AppSettings::from_json(
            r#"{
                "map": {"basemap": "light"},
                "default_criteria": {"cities": ["Bath"], "distance_range": [1, 9]},
                "dataset": {"path": "shops.csv", "columns": {"city": "Town"}}
            }"#,
        )
        .unwrap();

        assert_eq!(settings.map.basemap, Basemap::Light);
        assert_eq!(settings.map.zoom, 10.0);
        assert_eq!(settings.default_criteria.problems, FilterCriteria::default().problems);
        assert!(settings.default_criteria.cities.contains("Bath"));
        assert_eq!(settings.default_criteria.distance_range.hi, 9.0);

        let dataset = settings.dataset.unwrap();
        assert_eq!(dataset.path, PathBuf::from("shops.csv"));
        assert_eq!(dataset.columns.city, "Town");
        assert_eq!(dataset.columns.shop_name, "Shops");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(AppSettings::from_json("{ not json").is_err());
    }

    fn cli(config: Option<&str>, data: Option<&str>) -> Cli {
        Cli {
            config: config.map(PathBuf::from),
            data: data.map(PathBuf::from),
        }
    }

    #[test]
    fn test_command_line_arguments() {
        let parsed = Cli::try_parse_from(["garage-finder", "--config", "finder.json", "shops.csv"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("finder.json")));
        assert_eq!(parsed.data, Some(PathBuf::from("shops.csv")));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["garage-finder", "--colour", "red"]).is_err());
        assert!(Cli::try_parse_from(["garage-finder", "a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn test_dataset_path_overrides_defaults() {
        let settings = AppSettings::resolve(&cli(None, Some("shops.csv"))).unwrap();
        assert_eq!(settings.dataset.unwrap().path, PathBuf::from("shops.csv"));

        let settings = AppSettings::resolve(&Cli::default()).unwrap();
        assert!(settings.dataset.is_none());
    }

    #[test]
    fn test_settings_file_then_path_override() {
        let path = std::env::temp_dir().join(format!("gf-settings-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"reference_shop": "Kwik Fit", "dataset": {"path": "file.csv", "delimiter": ";"}}"#,
        )
        .unwrap();

        let from_file = AppSettings::resolve(&cli(path.to_str(), None)).unwrap();
        let overridden = AppSettings::resolve(&cli(path.to_str(), Some("cli.csv"))).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(from_file.dataset.unwrap().path, PathBuf::from("file.csv"));

        assert_eq!(overridden.reference_shop, "Kwik Fit");
        let dataset = overridden.dataset.unwrap();
        assert_eq!(dataset.path, PathBuf::from("cli.csv"));
        assert_eq!(dataset.delimiter, ';');
    }

    #[test]
    fn test_missing_settings_file_is_an_error() {
        let result = AppSettings::resolve(&cli(Some("/nonexistent/gf-settings.json"), None));
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read settings file"));
    }
}
