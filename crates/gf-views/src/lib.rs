//! Map scene composition and rendering for the garage finder

mod composer;
mod map_view;
mod pick;
mod scene;
mod session;
pub mod stats;

pub use composer::{MapComposer, DEFAULT_FALLBACK_CENTER};
pub use map_view::MapView;
pub use pick::PointIndex;
pub use scene::{
    Basemap, CenterSource, HoverMode, MapPoint, MapScene, MapStyle, MarkerGlyph, MarkerStyle, PointLayer,
    TextPosition,
};
pub use session::{recompute, ViewerSession};
