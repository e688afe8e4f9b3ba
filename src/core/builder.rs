//! Map builder for fluent configuration
//!
//! A MapBuilder assembles a [`Map`] from options or piece by piece,
//! choosing the loader and the drawing surface.

use crate::{
    core::{
        config::{LayerOptions, MapOptions},
        geo::GridCoord,
        map::Map,
        view::View,
    },
    layers::tile::TileLayer,
    rendering::surface::Surface,
    tiles::loader::ImageLoader,
    MapError, Result,
};
use std::rc::Rc;

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    target: String,
    view: View,
    layers: Vec<TileLayer>,
    layer_options: Vec<LayerOptions>,
    loader: Option<Rc<dyn ImageLoader>>,
    surface: Option<Box<dyn Surface>>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        let defaults = MapOptions::default();
        Self {
            target: defaults.target,
            view: defaults.view.build(),
            layers: Vec::new(),
            layer_options: Vec::new(),
            loader: None,
            surface: None,
        }
    }

    /// Start from deserialized options
    pub fn from_options(options: MapOptions) -> Self {
        Self {
            target: options.target,
            view: options.view.build(),
            layers: Vec::new(),
            layer_options: options.layers,
            loader: None,
            surface: None,
        }
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub fn center(mut self, col: f64, row: f64) -> Self {
        self.view.set_center(GridCoord::new(col, row));
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.view.set_zoom(zoom);
        self
    }

    pub fn layer(mut self, layer: TileLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }

    pub fn shared_loader(mut self, loader: Rc<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Build the map.
    ///
    /// Layers from options come first, then layers added by hand. Fails
    /// when no loader was given or a layer's grid differs from the rest.
    pub fn build(self) -> Result<Map> {
        let loader = self
            .loader
            .ok_or_else(|| MapError::Load {
                locator: self.target.clone(),
                reason: "no image loader configured".to_string(),
            })?;

        let options = MapOptions {
            target: self.target.clone(),
            layers: self.layer_options,
            view: Default::default(),
        };

        let mut map = Map::new(self.target, self.view, loader);
        if let Some(surface) = self.surface {
            map.attach_surface(surface);
        }
        for layer in options.build_layers().into_iter().chain(self.layers) {
            map.push_layer(layer)?;
        }
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
