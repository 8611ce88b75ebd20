//! Core functionality for the garage finder
//!
//! This crate provides the shop data model, the filter engine that splits a
//! dataset into candidate and reference rows, and the selection state that
//! drives the availability display.

pub mod criteria;
pub mod filter;
pub mod selection;
pub mod shop;

// Re-export commonly used types
pub use criteria::{DistanceRange, FilterCriteria};
pub use filter::{FilterEngine, Partition};
pub use selection::{DetailPayload, Selection, SelectionResolver};
pub use shop::{Dataset, GeoCoord, LayerKind, PointId, Row, RowId, ShopRecord, REFERENCE_SHOP_NAME};
pub use data::ShopSource;

pub mod data {
    use crate::shop::Dataset;

    /// Trait for anything that can produce the shop dataset
    #[async_trait::async_trait]
    pub trait ShopSource: Send + Sync {
        /// Load the full dataset. Called once per process.
        async fn load(&self) -> anyhow::Result<Dataset>;

        /// Get the source name/path
        fn source_name(&self) -> &str;
    }
}
