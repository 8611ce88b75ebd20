//! Renderer-ready description of the map

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use gf_core::{DetailPayload, GeoCoord, LayerKind, PointId, Selection};

/// Edge length of a web-mercator tile in pixels
const TILE_SIZE_PX: f64 = 256.0;

/// On-screen length of a degree of longitude relative to a degree of latitude
/// near `lat`
pub fn lon_scale(lat: f64) -> f64 {
    lat.to_radians().cos().abs().max(0.01)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerGlyph {
    Circle,
    Car,
}

/// Where a point's visible label sits relative to the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextPosition {
    TopCenter,
}

/// Visual style shared by every point of a layer
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub glyph: MarkerGlyph,
    /// RGBA
    pub color: [u8; 4],
    /// Marker size in pixels
    pub size: f32,
    pub opacity: f32,
    /// RGBA
    pub text_color: [u8; 4],
    pub text_size: f32,
    pub text_position: TextPosition,
}

impl MarkerStyle {
    /// Black-labelled circles for search results
    pub fn candidate() -> Self {
        Self {
            glyph: MarkerGlyph::Circle,
            color: [31, 119, 180, 255],
            size: 20.0,
            opacity: 1.0,
            text_color: [0, 0, 0, 255],
            text_size: 16.0,
            text_position: TextPosition::TopCenter,
        }
    }

    /// Red car marker for the reference location
    pub fn reference() -> Self {
        Self {
            glyph: MarkerGlyph::Car,
            color: [255, 0, 0, 255],
            size: 20.0,
            opacity: 1.0,
            text_color: [255, 0, 0, 255],
            text_size: 15.0,
            text_position: TextPosition::TopCenter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basemap {
    Streets,
    Light,
    Dark,
    Satellite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Closest,
}

/// Map-wide style directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub zoom: f64,
    pub basemap: Basemap,
    pub show_legend: bool,
    pub hover_mode: HoverMode,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom: 10.0,
            basemap: Basemap::Streets,
            show_legend: false,
            hover_mode: HoverMode::Closest,
        }
    }
}

impl MapStyle {
    /// Longitude and latitude span, in degrees, of a viewport of the given
    /// pixel size centered at `center`
    pub fn viewport_span(&self, center: GeoCoord, width_px: f32, height_px: f32) -> (f64, f64) {
        let width = if width_px > 0.0 { f64::from(width_px) } else { TILE_SIZE_PX };
        let height = if height_px > 0.0 { f64::from(height_px) } else { width };

        let lon_span = width / TILE_SIZE_PX * 360.0 / 2f64.powf(self.zoom);
        let lat_span = lon_span * (height / width) * lon_scale(center.lat);
        (lon_span, lat_span)
    }
}

/// One marker on the map
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub id: PointId,
    pub position: GeoCoord,
    /// Always-visible text next to the marker
    pub label: String,
    /// Text shown on hover
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLayer {
    pub kind: LayerKind,
    pub marker: MarkerStyle,
    pub points: Vec<MapPoint>,
}

impl PointLayer {
    pub fn new(kind: LayerKind, marker: MarkerStyle) -> Self {
        Self {
            kind,
            marker,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Where the scene center came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterSource {
    /// Median of candidate coordinates
    Candidates,
    /// No candidates; median of reference coordinates
    ReferenceRows,
    /// Neither layer had a usable coordinate
    Fallback,
}

/// Two point layers, a center and a style, plus the detail payload of each point
#[derive(Debug, Clone)]
pub struct MapScene {
    pub candidate_layer: PointLayer,
    pub reference_layer: PointLayer,
    pub center: GeoCoord,
    pub center_source: CenterSource,
    pub style: MapStyle,
    pub(crate) payloads: AHashMap<PointId, DetailPayload>,
}

impl MapScene {
    /// Layers in draw order: candidates first, reference on top
    pub fn layers(&self) -> [&PointLayer; 2] {
        [&self.candidate_layer, &self.reference_layer]
    }

    /// Longitude scale at the scene center
    pub fn lon_scale(&self) -> f64 {
        lon_scale(self.center.lat)
    }

    pub fn points(&self) -> impl Iterator<Item = &MapPoint> + '_ {
        self.layers().into_iter().flat_map(|layer| layer.points.iter())
    }

    pub fn point(&self, id: PointId) -> Option<&MapPoint> {
        self.points().find(|point| point.id == id)
    }

    /// Payload attached to a point. `None` when the point has no entry.
    pub fn payload(&self, id: PointId) -> Option<&DetailPayload> {
        self.payloads.get(&id)
    }

    /// Selection produced by picking `id`. Points without a payload entry resolve
    /// to a selection with absent availability.
    pub fn pick(&self, id: PointId) -> Selection {
        let payload = self.payload(id).cloned().flatten();
        Selection::picked(id, payload)
    }
}
