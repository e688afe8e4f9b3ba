pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{InputEvent, KeyCode};
pub use handler::{Action, Band, HoverZone, InputHandler};
