//! Shop records and the read-only dataset they live in

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shop name that identifies the fixed reference location
pub const REFERENCE_SHOP_NAME: &str = "Halfords Autocentre";

/// One row of the shop dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// Business name, not necessarily unique
    pub shop_name: String,

    pub city: String,

    /// Repair issue category
    pub problem: String,

    /// Distance from the reference location in miles
    pub distance_from_reference: f64,

    pub latitude: f64,
    pub longitude: f64,

    /// Display-only price label
    pub price: String,

    /// `None` means no availability data
    pub earliest_availability: Option<String>,
}

impl ShopRecord {
    /// Whether this row is the given reference shop
    pub fn is_reference(&self, reference_name: &str) -> bool {
        self.shop_name == reference_name
    }

    pub fn position(&self) -> GeoCoord {
        GeoCoord::new(self.latitude, self.longitude)
    }
}

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Stable index of a row within its dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub usize);

/// Which map layer a point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerKind {
    /// Searchable results
    Candidate,
    /// Fixed landmark, always shown
    Reference,
}

/// Identity of a rendered map point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointId {
    pub layer: LayerKind,
    pub row: RowId,
}

impl PointId {
    pub const fn candidate(row: RowId) -> Self {
        Self { layer: LayerKind::Candidate, row }
    }

    pub const fn reference(row: RowId) -> Self {
        Self { layer: LayerKind::Reference, row }
    }
}

/// A borrowed dataset row together with its id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row<'a> {
    pub id: RowId,
    pub record: &'a ShopRecord,
}

/// Immutable shop dataset, loaded once and shared by every session
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Arc<[ShopRecord]>,
}

impl Dataset {
    pub fn new(records: Vec<ShopRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&ShopRecord> {
        self.records.get(id.0)
    }

    /// Iterate rows in input order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| Row { id: RowId(idx), record })
    }

    pub fn records(&self) -> &[ShopRecord] {
        &self.records
    }
}

impl FromIterator<ShopRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ShopRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
