use crate::{core::geo::GridSize, layers::tile::TileLayer, MapError, Result};

/// Manages the map's layers in draw order.
///
/// Every layer shares one grid geometry, so navigation bounds are the
/// same whichever layer is on top.
#[derive(Debug, Default)]
pub struct LayerManager {
    /// Layers in render order (first drawn first)
    layers: Vec<TileLayer>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer on top of the existing ones.
    ///
    /// Ids are unique within a manager.
    pub fn add_layer(&mut self, layer: TileLayer) -> Result<()> {
        if self.get_layer(layer.id()).is_some() {
            return Err(MapError::DuplicateLayer(layer.id().to_string()));
        }
        if let Some(expected) = self.grid() {
            let found = layer.grid();
            if found != expected {
                return Err(MapError::GridMismatch {
                    layer_id: layer.id().to_string(),
                    expected,
                    found,
                });
            }
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Removes a layer by id
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<TileLayer> {
        let pos = self.layers.iter().position(|l| l.id() == layer_id)?;
        Some(self.layers.remove(pos))
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&TileLayer> {
        self.layers.iter().find(|l| l.id() == layer_id)
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut TileLayer) -> R,
    {
        self.layers.iter_mut().find(|l| l.id() == layer_id).map(f)
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.id().to_string()).collect()
    }

    /// Gets all layers in render order
    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    /// The grid shared by all layers, if there are any
    pub fn grid(&self) -> Option<GridSize> {
        self.layers.first().map(|l| l.grid())
    }

    /// An unused `layer-{n}` id for a layer added without one
    pub fn next_layer_id(&self) -> String {
        generated_layer_id(self.len(), |id| self.get_layer(id).is_some())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// First `layer-{n}` id, counting up from `start`, for which `taken` is false
pub(crate) fn generated_layer_id(start: usize, taken: impl Fn(&str) -> bool) -> String {
    (start..)
        .map(|n| format!("layer-{}", n))
        .find(|id| !taken(id))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::source::ImageSource;

    fn layer(id: &str, cols: u32, rows: u32) -> TileLayer {
        TileLayer::from_source(
            id,
            ImageSource::with_division(format!("{id}.png"), GridSize::new(cols, rows)),
        )
    }

    #[test]
    fn test_render_order_follows_insertion() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 5, 5)).unwrap();
        manager.add_layer(layer("b", 5, 5)).unwrap();
        manager.add_layer(layer("c", 5, 5)).unwrap();
        assert_eq!(manager.list_layers(), vec!["a", "b", "c"]);

        manager.remove_layer("b");
        assert_eq!(manager.list_layers(), vec!["a", "c"]);
    }

    #[test]
    fn test_rejects_different_grid() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 5, 5)).unwrap();
        let err = manager.add_layer(layer("b", 3, 3)).unwrap_err();
        assert!(matches!(err, MapError::GridMismatch { .. }));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_grid_follows_remaining_layers() {
        let mut manager = LayerManager::new();
        assert_eq!(manager.grid(), None);
        manager.add_layer(layer("a", 4, 2)).unwrap();
        assert_eq!(manager.grid(), Some(GridSize::new(4, 2)));
        assert!(manager.remove_layer("missing").is_none());
        manager.remove_layer("a");
        assert!(manager.is_empty());
        assert_eq!(manager.grid(), None);
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("world", 5, 5)).unwrap();
        let err = manager.add_layer(layer("world", 5, 5)).unwrap_err();
        assert!(matches!(err, MapError::DuplicateLayer(id) if id == "world"));
        assert_eq!(manager.list_layers(), vec!["world"]);

        manager.remove_layer("world");
        assert!(manager.is_empty());
    }

    #[test]
    fn test_next_layer_id_skips_used_ids() {
        let mut manager = LayerManager::new();
        assert_eq!(manager.next_layer_id(), "layer-0");

        manager.add_layer(layer("layer-0", 5, 5)).unwrap();
        manager.add_layer(layer("layer-1", 5, 5)).unwrap();
        manager.remove_layer("layer-0");
        // one layer left, but layer-1 is still taken
        assert_eq!(manager.next_layer_id(), "layer-2");
    }

    #[test]
    fn test_with_layer_mut() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 5, 5)).unwrap();
        manager.with_layer_mut("a", |l| l.set_visible(false));
        assert!(!manager.get_layer("a").unwrap().is_visible());
    }
}
