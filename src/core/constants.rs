//! Viewer-wide constants.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Fixed tile width in source pixels.
pub const TILE_WIDTH: u32 = 800;

/// Fixed tile height in source pixels.
pub const TILE_HEIGHT: u32 = 600;

/// Grid division used when a source does not specify one.
pub const DEFAULT_DIVISION: [u32; 2] = [5, 5];

/// Zoom level of a freshly created view.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Amount a single zoom in/out event changes the zoom level.
pub const ZOOM_STEP: f64 = 0.5;

/// Lowest reachable zoom through input.
pub const MIN_ZOOM: f64 = 0.5;

/// Highest reachable zoom through input.
pub const MAX_ZOOM: f64 = 5.0;

/// Border drawn around the scaled tile.
pub const TILE_BORDER_COLOR: &str = "#333333";

/// Border stroke width in surface pixels.
pub const TILE_BORDER_WIDTH: f64 = 2.0;

/// Background filled when the view points outside the grid.
pub const ERROR_BACKGROUND: &str = "#402020";

/// Text colour of the out-of-bounds message.
pub const ERROR_TEXT_COLOR: &str = "#ffffff";

/// Text colour of the debug overlay.
pub const OVERLAY_TEXT_COLOR: &str = "#ffffff";

/// Font of the debug overlay.
pub const OVERLAY_FONT: &str = "14px monospace";

/// Font of the out-of-bounds message.
pub const ERROR_FONT: &str = "24px sans-serif";

/// Line height of the debug overlay, in surface pixels.
pub const OVERLAY_LINE_HEIGHT: f64 = 18.0;

/// Offset of the overlay's first line from the top-left corner.
pub const OVERLAY_MARGIN: f64 = 10.0;
