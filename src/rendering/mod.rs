pub mod context;
pub mod pipeline;
#[cfg(feature = "raster")]
pub mod raster;
pub mod surface;

// Re-export main types
pub use context::{DrawCommand, RenderContext};
pub use pipeline::{fit_tile, render_frame, FrameSummary, LayerPass};
#[cfg(feature = "raster")]
pub use raster::RasterSurface;
pub use surface::{Surface, TextAlign, TextStyle};
