//! Prelude module for common tileview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use tileview::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{LayerOptions, MapOptions, SourceOptions, ViewOptions},
    geo::{GridCoord, GridSize, Point, Rect, TileIndex, TileSize},
    map::Map,
    view::{Direction, View},
};

pub use crate::layers::{
    manager::LayerManager,
    source::{Bitmap, ImageSource, SharedSource},
    tile::TileLayer,
};

pub use crate::input::{
    events::{InputEvent, KeyCode},
    handler::{Action, HoverZone, InputHandler},
};

pub use crate::rendering::{
    context::{DrawCommand, RenderContext},
    pipeline::{FrameSummary, LayerPass},
    surface::{Surface, TextAlign, TextStyle},
};

#[cfg(feature = "raster")]
pub use crate::rendering::raster::RasterSurface;

pub use crate::tiles::{
    loader::ImageLoader,
    preload::{LoadOutcome, PreloadReport, SourceReport},
};

#[cfg(all(feature = "raster", feature = "tokio-runtime"))]
pub use crate::tiles::loader::FileLoader;

#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
pub use crate::tiles::loader::HttpLoader;

pub use crate::{Error as MapError, Result};
