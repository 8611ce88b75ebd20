//! Dataset file configuration

use std::path::PathBuf;
use serde::{Serialize, Deserialize};

use super::null_handling::NullConfig;

/// Names of the dataset columns the loader reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub shop_name: String,
    pub problem: String,
    pub city: String,
    pub distance: String,
    pub latitude: String,
    pub longitude: String,
    pub price: String,
    pub earliest_availability: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            shop_name: "Shops".to_string(),
            problem: "Problem".to_string(),
            city: "city".to_string(),
            distance: "Distance from Halfords".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            price: "Prices".to_string(),
            earliest_availability: "earliest_avail".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Text columns in schema order
    pub fn text_columns(&self) -> [&str; 5] {
        [
            self.shop_name.as_str(),
            self.problem.as_str(),
            self.city.as_str(),
            self.price.as_str(),
            self.earliest_availability.as_str(),
        ]
    }

    /// Numeric columns in schema order
    pub fn numeric_columns(&self) -> [&str; 3] {
        [
            self.distance.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
        ]
    }
}

/// Configuration for the dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the CSV file
    pub path: PathBuf,

    /// Column names
    pub columns: ColumnMapping,

    /// Null handling configuration
    pub null_config: NullConfig,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            columns: ColumnMapping::default(),
            null_config: NullConfig::default(),
            delimiter: ',',
        }
    }
}

impl DatasetConfig {
    /// Create a configuration for `path` with the default columns
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Get the file name
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Delimiter as a byte for the csv reader; non-ASCII falls back to a comma
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',')
    }
}
