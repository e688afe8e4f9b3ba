use crate::{
    core::geo::GridSize,
    layers::source::{ImageSource, SharedSource},
};

/// Binds an image source into the map's draw order
#[derive(Debug, Clone)]
pub struct TileLayer {
    id: String,
    source: SharedSource,
    opacity: f64,
    visible: bool,
}

impl TileLayer {
    pub fn new(id: impl Into<String>, source: SharedSource) -> Self {
        Self {
            id: id.into(),
            source,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Convenience constructor that wraps an unshared source
    pub fn from_source(id: impl Into<String>, source: ImageSource) -> Self {
        Self::new(id, source.shared())
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.set_opacity(opacity);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &SharedSource {
        &self.source
    }

    pub fn grid(&self) -> GridSize {
        self.source.borrow().grid()
    }

    pub fn is_loaded(&self) -> bool {
        self.source.borrow().is_loaded()
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let layer = TileLayer::from_source("base", ImageSource::new("map.png"));
        assert_eq!(layer.id(), "base");
        assert_eq!(layer.opacity(), 1.0);
        assert!(layer.is_visible());
        assert!(!layer.is_loaded());
    }

    #[test]
    fn test_opacity_clamped() {
        let mut layer = TileLayer::from_source("base", ImageSource::new("map.png"));
        layer.set_opacity(1.5);
        assert_eq!(layer.opacity(), 1.0);
        layer.set_opacity(-0.2);
        assert_eq!(layer.opacity(), 0.0);
    }

    #[test]
    fn test_shared_source() {
        let source = ImageSource::new("map.png").shared();
        let a = TileLayer::new("a", source.clone());
        let b = TileLayer::new("b", source);
        assert!(std::rc::Rc::ptr_eq(a.source(), b.source()));
    }
}
