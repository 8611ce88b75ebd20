//! Arrow schema of the shop table and header resolution

use arrow::datatypes::{DataType, Field, Schema};
use csv::StringRecord;

use crate::config::ColumnMapping;
use crate::DataError;

/// Schema of the shop table: text columns first, then numeric columns.
/// Every column is nullable; required values are checked when rows are converted.
pub fn shop_schema(columns: &ColumnMapping) -> Schema {
    let text = columns
        .text_columns()
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true));
    let numeric = columns
        .numeric_columns()
        .into_iter()
        .map(|name| Field::new(name, DataType::Float64, true));

    Schema::new(text.chain(numeric).collect::<Vec<_>>())
}

/// Find the CSV position of every schema field.
///
/// Header cells are trimmed and a leading byte order mark is ignored.
/// Columns not in the schema are skipped.
pub fn locate_columns(headers: &StringRecord, schema: &Schema) -> Result<Vec<usize>, DataError> {
    let normalized: Vec<&str> = headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim())
        .collect();

    schema
        .fields()
        .iter()
        .map(|field| {
            normalized
                .iter()
                .position(|header| *header == field.name().as_str())
                .ok_or_else(|| DataError::MissingColumn(field.name().clone()))
        })
        .collect()
}
