//! Browser binding: canvas surface, `<img>` loading and DOM listeners

pub mod bindings;
pub mod canvas;
pub mod listeners;
pub mod loader;
pub mod logger;

pub use bindings::WebMap;
pub use canvas::CanvasSurface;
pub use listeners::Subscriptions;
pub use loader::HtmlImageLoader;
