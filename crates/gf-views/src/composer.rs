//! Builds a map scene from a filter partition

use ahash::AHashMap;
use tracing::debug;

use gf_core::{GeoCoord, LayerKind, Partition, PointId, Row, REFERENCE_SHOP_NAME};

use crate::scene::{CenterSource, MapPoint, MapScene, MapStyle, MarkerStyle, PointLayer};
use crate::stats::median;

/// Bristol city centre
pub const DEFAULT_FALLBACK_CENTER: GeoCoord = GeoCoord::new(51.4545, -2.5879);

/// Composes the two-layer map scene
#[derive(Debug, Clone)]
pub struct MapComposer {
    pub style: MapStyle,
    /// Used when neither layer yields a center
    pub fallback_center: GeoCoord,
    /// Visible label of every reference point
    pub reference_label: String,
    pub candidate_marker: MarkerStyle,
    pub reference_marker: MarkerStyle,
}

impl Default for MapComposer {
    fn default() -> Self {
        Self {
            style: MapStyle::default(),
            fallback_center: DEFAULT_FALLBACK_CENTER,
            reference_label: REFERENCE_SHOP_NAME.to_string(),
            candidate_marker: MarkerStyle::candidate(),
            reference_marker: MarkerStyle::reference(),
        }
    }
}

impl MapComposer {
    pub fn new(style: MapStyle, fallback_center: GeoCoord) -> Self {
        Self {
            style,
            fallback_center,
            ..Self::default()
        }
    }

    pub fn with_reference_label(mut self, label: impl Into<String>) -> Self {
        self.reference_label = label.into();
        self
    }

    pub fn compose_partition(&self, partition: &Partition<'_>) -> MapScene {
        self.compose(&partition.candidates, &partition.reference_rows)
    }

    /// Build the scene. Pure; nothing is rendered here.
    pub fn compose(&self, candidates: &[Row<'_>], reference_rows: &[Row<'_>]) -> MapScene {
        let mut payloads = AHashMap::with_capacity(candidates.len());

        let mut candidate_layer = PointLayer::new(LayerKind::Candidate, self.candidate_marker.clone());
        for row in candidates {
            let id = PointId::candidate(row.id);
            candidate_layer.points.push(MapPoint {
                id,
                position: row.record.position(),
                label: row.record.price.clone(),
                hover: row.record.shop_name.clone(),
            });
            payloads.insert(id, row.record.earliest_availability.clone());
        }

        let mut reference_layer = PointLayer::new(LayerKind::Reference, self.reference_marker.clone());
        for row in reference_rows {
            reference_layer.points.push(MapPoint {
                id: PointId::reference(row.id),
                position: row.record.position(),
                label: self.reference_label.clone(),
                hover: row.record.shop_name.clone(),
            });
        }

        let (center, center_source) = if let Some(center) = median_center(candidates) {
            (center, CenterSource::Candidates)
        } else if let Some(center) = median_center(reference_rows) {
            (center, CenterSource::ReferenceRows)
        } else {
            (self.fallback_center, CenterSource::Fallback)
        };

        debug!(
            candidates = candidate_layer.len(),
            reference = reference_layer.len(),
            ?center_source,
            "Composed map scene centered at {:.4}, {:.4}",
            center.lat,
            center.lon
        );

        MapScene {
            candidate_layer,
            reference_layer,
            center,
            center_source,
            style: self.style.clone(),
            payloads,
        }
    }
}

/// Median latitude and median longitude, computed independently
fn median_center(rows: &[Row<'_>]) -> Option<GeoCoord> {
    let lat = median(rows.iter().map(|row| row.record.latitude))?;
    let lon = median(rows.iter().map(|row| row.record.longitude))?;
    Some(GeoCoord::new(lat, lon))
}
