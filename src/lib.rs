//! # tileview
//!
//! A small viewer for one large image cut into a fixed grid of tiles.
//!
//! The map shows a single tile at a time, scaled to fit its drawing
//! surface, and moves between neighbouring tiles on keyboard or click
//! input. The core is headless and drives any [`Surface`]; the `wasm`
//! feature binds it to an HTML canvas.

pub mod core;
pub mod input;
pub mod layers;
#[cfg(feature = "debug")]
pub mod logging;
pub mod prelude;
pub mod rendering;
pub mod tiles;
#[cfg(feature = "wasm")]
pub mod web;

pub use crate::core::constants;
#[cfg(feature = "debug")]
pub use logging::init_logging;

// Re-export public API
pub use core::{
    builder::MapBuilder,
    config::{LayerOptions, MapOptions, SourceOptions, ViewOptions},
    geo::{GridCoord, GridSize, Point, Rect, TileIndex, TileSize},
    map::Map,
    view::{Direction, View},
};

pub use layers::{
    manager::LayerManager,
    source::{Bitmap, ImageSource, SharedSource},
    tile::TileLayer,
};

pub use input::{events::InputEvent, handler::InputHandler};

pub use rendering::{
    context::{DrawCommand, RenderContext},
    surface::Surface,
};

pub use tiles::{
    loader::ImageLoader,
    preload::{LoadOutcome, PreloadReport},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Failed to load {locator}: {reason}")]
    Load { locator: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Target element not found: {0}")]
    TargetNotFound(String),

    #[error("Layer {layer_id} uses a {found:?} grid but the map uses {expected:?}")]
    GridMismatch {
        layer_id: String,
        expected: GridSize,
        found: GridSize,
    },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Layer id already in use: {0}")]
    DuplicateLayer(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

#[cfg(feature = "raster")]
impl From<image::ImageError> for MapError {
    fn from(err: image::ImageError) -> Self {
        MapError::Decode(err.to_string())
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for MapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        MapError::Js(format!("{:?}", value))
    }
}

/// Error type alias for convenience
pub type Error = MapError;
