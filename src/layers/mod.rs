pub mod manager;
pub mod source;
pub mod tile;

pub use manager::LayerManager;
pub use source::{Bitmap, BitmapData, ImageSource, SharedSource};
pub use tile::TileLayer;
