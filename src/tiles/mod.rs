pub mod loader;
pub mod preload;

// Re-exports for convenience
pub use loader::ImageLoader;
#[cfg(all(feature = "raster", feature = "tokio-runtime"))]
pub use loader::FileLoader;
#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
pub use loader::HttpLoader;
pub use preload::{pending_sources, preload, LoadOutcome, PreloadReport, SourceReport};
