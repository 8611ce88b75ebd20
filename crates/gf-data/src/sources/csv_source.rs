use std::fs::File;
use std::io::{BufReader, Read};
use std::sync::Arc;
use async_trait::async_trait;
use arrow::array::*;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use tracing::{info, warn};

use gf_core::{Dataset, ShopRecord, ShopSource};

use crate::config::{ColumnMapping, DatasetConfig};
use crate::schema::{locate_columns, shop_schema};
use crate::DataError;

/// Outcome counters of one load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows found in the file
    pub rows_read: usize,
    /// Rows skipped because a required value was null
    pub rows_dropped: usize,
}

/// CSV data source for the shop dataset
pub struct CsvShopSource {
    config: DatasetConfig,
    source_name: String,
}

impl CsvShopSource {
    pub fn new(config: DatasetConfig) -> Self {
        let source_name = config.file_name();
        Self { config, source_name }
    }

    /// Read the file on a blocking thread
    pub async fn load_with_report(&self) -> Result<(Dataset, LoadReport), DataError> {
        info!("Loading shop dataset from {:?}", self.config.path);

        let config = self.config.clone();
        let (dataset, report) = tokio::task::spawn_blocking(move || -> Result<_, DataError> {
            let file = File::open(&config.path)?;
            read_dataset(BufReader::new(file), &config)
        })
        .await??;

        info!(
            rows = dataset.len(),
            dropped = report.rows_dropped,
            "Loaded shop dataset '{}'",
            self.source_name
        );

        Ok((dataset, report))
    }
}

#[async_trait]
impl ShopSource for CsvShopSource {
    async fn load(&self) -> anyhow::Result<Dataset> {
        let (dataset, _) = self.load_with_report().await?;
        Ok(dataset)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// Parse CSV into the dataset
pub fn read_dataset<R: Read>(reader: R, config: &DatasetConfig) -> Result<(Dataset, LoadReport), DataError> {
    let batch = read_batch(reader, config)?;
    records_from_batch(&batch, &config.columns)
}

/// Parse CSV into an Arrow batch with the shop schema
pub fn read_batch<R: Read>(reader: R, config: &DatasetConfig) -> Result<RecordBatch, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter_byte())
        .from_reader(reader);

    let schema = Arc::new(shop_schema(&config.columns));
    let headers = csv_reader.headers()?.clone();
    let positions = locate_columns(&headers, &schema)?;

    let mut row_data: Vec<csv::StringRecord> = Vec::new();
    for result in csv_reader.records() {
        row_data.push(result?);
    }

    let null_config = &config.null_config;
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(positions.len());

    for (field, &col_idx) in schema.fields().iter().zip(&positions) {
        let array: ArrayRef = match field.data_type() {
            DataType::Float64 => {
                let mut builder = Float64Builder::with_capacity(row_data.len());
                for (row_idx, row) in row_data.iter().enumerate() {
                    match row.get(col_idx).and_then(|raw| null_config.value(raw)) {
                        None => builder.append_null(),
                        Some(value) => match value.parse::<f64>() {
                            Ok(v) => builder.append_value(v),
                            Err(_) => {
                                return Err(DataError::InvalidNumber {
                                    column: field.name().clone(),
                                    row: row_idx + 1,
                                    value: value.to_string(),
                                })
                            }
                        },
                    }
                }
                Arc::new(builder.finish())
            }
            _ => {
                let mut builder = StringBuilder::new();
                for row in &row_data {
                    builder.append_option(row.get(col_idx).and_then(|raw| null_config.value(raw)));
                }
                Arc::new(builder.finish())
            }
        };

        columns.push(array);
    }

    RecordBatch::try_new(schema, columns).map_err(|e| e.into())
}

/// Convert a shop batch into records.
///
/// Rows missing a name, problem, city, distance or coordinate are dropped.
pub fn records_from_batch(batch: &RecordBatch, columns: &ColumnMapping) -> Result<(Dataset, LoadReport), DataError> {
    let shops = string_column(batch, &columns.shop_name)?;
    let problems = string_column(batch, &columns.problem)?;
    let cities = string_column(batch, &columns.city)?;
    let prices = string_column(batch, &columns.price)?;
    let availability = string_column(batch, &columns.earliest_availability)?;
    let distances = float_column(batch, &columns.distance)?;
    let latitudes = float_column(batch, &columns.latitude)?;
    let longitudes = float_column(batch, &columns.longitude)?;

    let mut records = Vec::with_capacity(batch.num_rows());
    let mut report = LoadReport {
        rows_read: batch.num_rows(),
        rows_dropped: 0,
    };

    for i in 0..batch.num_rows() {
        let required = (
            text_at(shops, i),
            text_at(problems, i),
            text_at(cities, i),
            number_at(distances, i),
            number_at(latitudes, i),
            number_at(longitudes, i),
        );

        match required {
            (Some(shop_name), Some(problem), Some(city), Some(distance), Some(latitude), Some(longitude)) => {
                records.push(ShopRecord {
                    shop_name,
                    city,
                    problem,
                    distance_from_reference: distance,
                    latitude,
                    longitude,
                    price: text_at(prices, i).unwrap_or_default(),
                    earliest_availability: text_at(availability, i),
                });
            }
            _ => {
                warn!(row = i + 1, "Dropping shop row with a missing required value");
                report.rows_dropped += 1;
            }
        }
    }

    Ok((Dataset::new(records), report))
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray, DataError> {
    batch
        .column_by_name(name)
        .and_then(|array| array.as_any().downcast_ref::<StringArray>())
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

fn float_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Float64Array, DataError> {
    batch
        .column_by_name(name)
        .and_then(|array| array.as_any().downcast_ref::<Float64Array>())
        .ok_or_else(|| DataError::MissingColumn(name.to_string()))
}

fn text_at(array: &StringArray, i: usize) -> Option<String> {
    if array.is_null(i) {
        None
    } else {
        Some(array.value(i).to_string())
    }
}

fn number_at(array: &Float64Array, i: usize) -> Option<f64> {
    if array.is_null(i) {
        None
    } else {
        Some(array.value(i))
    }
}
