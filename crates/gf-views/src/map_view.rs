//! Map renderer built on egui_plot

use egui::{Align2, Color32, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotBounds, PlotPoint, PlotUi, Points, Text};

use gf_core::{GeoCoord, LayerKind, PointId};

use crate::pick::PointIndex;
use crate::scene::{MapScene, MarkerGlyph, PointLayer, TextPosition};

/// Clicks farther than this from every marker select nothing
const PICK_RADIUS_PX: f32 = 20.0;

/// Draws a [`MapScene`] and reports marker clicks
pub struct MapView {
    id: String,
    index: Option<PointIndex>,
    shown_generation: Option<u64>,
}

impl MapView {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            index: None,
            shown_generation: None,
        }
    }

    /// Draw the scene. Returns the point clicked this frame, if any.
    ///
    /// The view recenters whenever `generation` differs from the last one drawn;
    /// between generations the user may pan and zoom freely.
    pub fn ui(&mut self, ui: &mut Ui, scene: &MapScene, generation: u64) -> Option<PointId> {
        let new_scene = self.shown_generation != Some(generation);
        if new_scene || self.index.is_none() {
            self.index = Some(PointIndex::build(scene));
        }

        let size = ui.available_size();
        let (lon_span, lat_span) = scene.style.viewport_span(scene.center, size.x, size.y);
        let bounds = PlotBounds::from_min_max(
            [scene.center.lon - lon_span / 2.0, scene.center.lat - lat_span / 2.0],
            [scene.center.lon + lon_span / 2.0, scene.center.lat + lat_span / 2.0],
        );

        let mut plot = Plot::new(&self.id)
            .show_axes([false, false])
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .data_aspect((1.0 / scene.lon_scale()) as f32);
        if scene.style.show_legend {
            plot = plot.legend(Legend::default());
        }

        let index = self.index.as_ref();

        let response = plot.show(ui, |plot_ui| {
            if new_scene {
                plot_ui.set_plot_bounds(bounds);
            }

            for layer in scene.layers() {
                draw_layer(plot_ui, layer);
            }

            let hovered = plot_ui
                .pointer_coordinate()
                .zip(index)
                .and_then(|(pointer, index)| nearest_within(plot_ui, index, pointer, PICK_RADIUS_PX));
            (hovered, plot_ui.response().clicked())
        });

        self.shown_generation = Some(generation);

        let (hovered, clicked) = response.inner;
        let hovered_point = hovered.and_then(|id| scene.point(id));
        if let Some(point) = hovered_point {
            response.response.on_hover_text(point.hover.as_str());
        }

        if clicked {
            hovered
        } else {
            None
        }
    }
}

fn draw_layer(plot_ui: &mut PlotUi, layer: &PointLayer) {
    if layer.is_empty() {
        return;
    }

    let marker = &layer.marker;
    let positions: Vec<[f64; 2]> = layer
        .points
        .iter()
        .map(|point| [point.position.lon, point.position.lat])
        .collect();
    let name = match layer.kind {
        LayerKind::Candidate => "Garages",
        LayerKind::Reference => "Reference",
    };

    plot_ui.points(
        Points::new(positions)
            .radius(marker.size / 2.0)
            .color(to_color(marker.color, marker.opacity))
            .shape(glyph_shape(marker.glyph))
            .filled(true)
            .name(name),
    );

    let text_color = to_color(marker.text_color, 1.0);
    for point in &layer.points {
        if point.label.is_empty() {
            continue;
        }
        let label = RichText::new(point.label.as_str())
            .size(marker.text_size)
            .color(text_color);
        plot_ui.text(
            Text::new(PlotPoint::new(point.position.lon, point.position.lat), label)
                .anchor(text_anchor(marker.text_position)),
        );
    }
}

/// Nearest point to the pointer, if it lies within `radius_px` on screen
fn nearest_within(plot_ui: &PlotUi, index: &PointIndex, pointer: PlotPoint, radius_px: f32) -> Option<PointId> {
    let (id, position) = index.nearest(GeoCoord::new(pointer.y, pointer.x))?;
    let pointer_px = plot_ui.screen_from_plot(pointer);
    let point_px = plot_ui.screen_from_plot(PlotPoint::new(position.lon, position.lat));
    (pointer_px.distance(point_px) <= radius_px).then_some(id)
}

fn glyph_shape(glyph: MarkerGlyph) -> MarkerShape {
    match glyph {
        MarkerGlyph::Circle => MarkerShape::Circle,
        MarkerGlyph::Car => MarkerShape::Diamond,
    }
}

fn text_anchor(position: TextPosition) -> Align2 {
    match position {
        TextPosition::TopCenter => Align2::CENTER_BOTTOM,
    }
}

fn to_color([r, g, b, a]: [u8; 4], opacity: f32) -> Color32 {
    let alpha = (f32::from(a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}
