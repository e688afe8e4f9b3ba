use crate::core::{
    constants::{DEFAULT_DIVISION, TILE_HEIGHT, TILE_WIDTH},
    geo::{GridSize, TileSize},
};
use std::{cell::RefCell, rc::Rc};

/// Pixel storage behind a loaded bitmap
#[derive(Debug, Clone)]
pub enum BitmapData {
    /// Decoded RGBA pixels
    #[cfg(feature = "raster")]
    Raster(std::sync::Arc<image::RgbaImage>),
    /// Browser image element, drawn by the canvas surface
    #[cfg(feature = "wasm")]
    Element(web_sys::HtmlImageElement),
    /// Dimensions only, for headless recording surfaces
    Opaque,
}

/// A loaded source image
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: BitmapData,
}

impl Bitmap {
    /// A bitmap that only carries its dimensions
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: BitmapData::Opaque,
        }
    }

    #[cfg(feature = "raster")]
    pub fn from_rgba(image: image::RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: BitmapData::Raster(std::sync::Arc::new(image)),
        }
    }

    #[cfg(feature = "raster")]
    pub fn as_rgba(&self) -> Option<&image::RgbaImage> {
        match &self.data {
            BitmapData::Raster(image) => Some(image),
            _ => None,
        }
    }
}

/// An image source shared between layers
pub type SharedSource = Rc<RefCell<ImageSource>>;

/// One large image cut into a grid of fixed-size tiles.
///
/// Constructing a source never loads it; the map preloads sources
/// through its [`ImageLoader`](crate::tiles::loader::ImageLoader).
#[derive(Debug, Clone)]
pub struct ImageSource {
    locator: String,
    grid: GridSize,
    tile_size: TileSize,
    bitmap: Option<Bitmap>,
}

impl ImageSource {
    /// Creates a source with the default 5×5 division
    pub fn new(locator: impl Into<String>) -> Self {
        Self::with_division(locator, GridSize::from(DEFAULT_DIVISION))
    }

    pub fn with_division(locator: impl Into<String>, grid: GridSize) -> Self {
        Self {
            locator: locator.into(),
            grid,
            tile_size: TileSize::new(TILE_WIDTH, TILE_HEIGHT),
            bitmap: None,
        }
    }

    /// Wraps the source for sharing between layers
    pub fn shared(self) -> SharedSource {
        Rc::new(RefCell::new(self))
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    pub fn is_loaded(&self) -> bool {
        self.bitmap.is_some()
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Expected bitmap size for this grid and tile size
    pub fn expected_dimensions(&self) -> (u64, u64) {
        (
            self.grid.columns as u64 * self.tile_size.width as u64,
            self.grid.rows as u64 * self.tile_size.height as u64,
        )
    }

    /// Stores a freshly loaded bitmap.
    ///
    /// Only the first call has an effect. A size that does not match the
    /// grid is logged but still accepted. Returns whether the dimensions
    /// matched.
    pub fn set_loaded(&mut self, bitmap: Bitmap) -> bool {
        let (expected_w, expected_h) = self.expected_dimensions();
        let matches = bitmap.width as u64 == expected_w && bitmap.height as u64 == expected_h;

        if self.bitmap.is_some() {
            log::debug!("source {} already loaded, ignoring new bitmap", self.locator);
            return matches;
        }

        if !matches {
            log::warn!(
                "image {} is {}x{}, expected {}x{} for a {}x{} grid",
                self.locator,
                bitmap.width,
                bitmap.height,
                expected_w,
                expected_h,
                self.grid.columns,
                self.grid.rows
            );
        }

        self.bitmap = Some(bitmap);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_is_unloaded() {
        let source = ImageSource::new("map.png");
        assert!(!source.is_loaded());
        assert_eq!(source.grid(), GridSize::new(5, 5));
        assert_eq!(source.tile_size(), TileSize::new(800, 600));
        assert_eq!(source.expected_dimensions(), (4000, 3000));
    }

    #[test]
    fn test_dimension_mismatch_still_loads() {
        let mut source = ImageSource::with_division("map.png", GridSize::new(2, 2));
        assert!(!source.set_loaded(Bitmap::opaque(100, 100)));
        assert!(source.is_loaded());
    }

    #[test]
    fn test_loaded_only_once() {
        let mut source = ImageSource::with_division("map.png", GridSize::new(2, 2));
        assert!(source.set_loaded(Bitmap::opaque(1600, 1200)));
        source.set_loaded(Bitmap::opaque(10, 10));
        assert_eq!(source.bitmap().map(|b| b.width), Some(1600));
    }
}
