//! Construction options for maps, layers, sources and views.
//!
//! Options deserialize from JSON; every field except a source URL has a
//! default. Tile pixel size is fixed and not configurable.

use crate::{
    core::{
        constants::{DEFAULT_DIVISION, DEFAULT_ZOOM},
        geo::{GridCoord, GridSize},
        view::View,
    },
    layers::{
        manager::generated_layer_id,
        source::{ImageSource, SharedSource},
        tile::TileLayer,
    },
    Result,
};
use serde::{Deserialize, Serialize};

fn default_target() -> String {
    "map".to_string()
}

fn default_division() -> [u32; 2] {
    DEFAULT_DIVISION
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

/// Options recognised by an image source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceOptions {
    pub url: String,
    #[serde(default = "default_division")]
    pub division: [u32; 2],
}

impl SourceOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            division: DEFAULT_DIVISION,
        }
    }

    pub fn build(&self) -> ImageSource {
        ImageSource::with_division(self.url.clone(), GridSize::from(self.division))
    }
}

/// Options recognised by a tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerOptions {
    #[serde(default)]
    pub id: Option<String>,
    pub source: SourceOptions,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl LayerOptions {
    pub fn new(source: SourceOptions) -> Self {
        Self {
            id: None,
            source,
            opacity: default_opacity(),
            visible: default_visible(),
        }
    }
}

/// Options recognised by a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default)]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            zoom: default_zoom(),
        }
    }
}

impl ViewOptions {
    pub fn build(&self) -> View {
        View::new(GridCoord::from(self.center), self.zoom)
    }
}

/// Options recognised by a map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    /// Id of the element hosting the drawing surface
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub layers: Vec<LayerOptions>,
    #[serde(default)]
    pub view: ViewOptions,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            target: default_target(),
            layers: Vec::new(),
            view: ViewOptions::default(),
        }
    }
}

impl MapOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Builds the layers in order.
    ///
    /// Layers naming the same URL and division share one source, so it is
    /// loaded only once. Layers without an id get a `layer-{n}` id that no
    /// other layer uses.
    pub fn build_layers(&self) -> Vec<TileLayer> {
        let explicit: Vec<&str> = self.layers.iter().filter_map(|l| l.id.as_deref()).collect();
        let mut generated: Vec<String> = Vec::new();
        let mut sources: Vec<(SourceOptions, SharedSource)> = Vec::new();
        self.layers
            .iter()
            .enumerate()
            .map(|(i, opts)| {
                let source = match sources.iter().find(|(o, _)| *o == opts.source) {
                    Some((_, shared)) => shared.clone(),
                    None => {
                        let shared = opts.source.build().shared();
                        sources.push((opts.source.clone(), shared.clone()));
                        shared
                    }
                };
                let id = match &opts.id {
                    Some(id) => id.clone(),
                    None => {
                        let id = generated_layer_id(i, |id| {
                            explicit.contains(&id) || generated.iter().any(|g| g == id)
                        });
                        generated.push(id.clone());
                        id
                    }
                };
                TileLayer::new(id, source)
                    .with_opacity(opts.opacity)
                    .with_visible(opts.visible)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let options = MapOptions::from_json(r#"{"layers": [{"source": {"url": "world.png"}}]}"#)
            .unwrap();
        assert_eq!(options.target, "map");
        assert_eq!(options.view, ViewOptions::default());

        let layer = &options.layers[0];
        assert_eq!(layer.opacity, 1.0);
        assert!(layer.visible);
        assert_eq!(layer.source.division, [5, 5]);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "target": "viewer",
            "layers": [
                {"id": "base", "source": {"url": "a.png", "division": [3, 2]}, "opacity": 0.5, "visible": false}
            ],
            "view": {"center": [1, 1], "zoom": 2.5}
        }"#;
        let options = MapOptions::from_json(json).unwrap();
        assert_eq!(options.target, "viewer");

        let view = options.view.build();
        assert_eq!(view.center(), GridCoord::new(1.0, 1.0));
        assert_eq!(view.zoom(), 2.5);

        let layers = options.build_layers();
        assert_eq!(layers[0].id(), "base");
        assert_eq!(layers[0].opacity(), 0.5);
        assert!(!layers[0].is_visible());
        assert_eq!(layers[0].grid(), GridSize::new(3, 2));
    }

    #[test]
    fn test_missing_source_url_rejected() {
        assert!(MapOptions::from_json(r#"{"layers": [{"source": {}}]}"#).is_err());
    }

    #[test]
    fn test_generated_ids_avoid_explicit_ones() {
        let json = r#"{"layers": [
            {"source": {"url": "a.png"}},
            {"id": "layer-0", "source": {"url": "b.png"}},
            {"source": {"url": "c.png"}}
        ]}"#;
        let ids: Vec<String> = MapOptions::from_json(json)
            .unwrap()
            .build_layers()
            .iter()
            .map(|l| l.id().to_string())
            .collect();
        assert_eq!(ids, vec!["layer-1", "layer-0", "layer-2"]);
    }

    #[test]
    fn test_same_url_shares_source() {
        let mut options = MapOptions::default();
        options.layers.push(LayerOptions::new(SourceOptions::new("a.png")));
        options.layers.push(LayerOptions::new(SourceOptions::new("a.png")));
        options.layers.push(LayerOptions::new(SourceOptions::new("b.png")));

        let layers = options.build_layers();
        assert_eq!(layers[1].id(), "layer-1");
        assert!(std::rc::Rc::ptr_eq(layers[0].source(), layers[1].source()));
        assert!(!std::rc::Rc::ptr_eq(layers[0].source(), layers[2].source()));
    }
}
