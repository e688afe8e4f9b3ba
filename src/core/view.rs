use crate::core::{
    constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP},
    geo::{GridCoord, GridSize},
};
use serde::{Deserialize, Serialize};

/// One-tile step directions on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Column and row delta of one step
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }
}

/// The current view of the grid: which tile is centered and how far we
/// are zoomed.
///
/// `resolution` is derived from `zoom` and only changes through
/// [`View::set_zoom`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    center: GridCoord,
    zoom: f64,
    resolution: f64,
}

impl View {
    /// Creates a new view
    pub fn new(center: GridCoord, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            resolution: resolution_for(zoom),
        }
    }

    pub fn center(&self) -> GridCoord {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Replaces the center. No bounds are applied here.
    pub fn set_center(&mut self, center: GridCoord) {
        self.center = center;
    }

    /// Sets the zoom level and recomputes the resolution
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
        self.resolution = resolution_for(zoom);
    }

    /// Zooms in by one step, clamped to the allowed range
    pub fn zoom_in(&mut self) {
        self.set_zoom((self.zoom + ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM));
    }

    /// Zooms out by one step, clamped to the allowed range
    pub fn zoom_out(&mut self) {
        self.set_zoom((self.zoom - ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM));
    }

    /// Moves one tile in `direction`, clamped to `grid`.
    ///
    /// The moved axis snaps to its tile index before stepping. Returns
    /// whether the center changed.
    pub fn step(&mut self, direction: Direction, grid: GridSize) -> bool {
        let (dc, dr) = direction.delta();
        let old = self.center;
        let next = if dc != 0.0 {
            old.with_col((old.col.floor() + dc).clamp(0.0, grid.max_col()))
        } else {
            old.with_row((old.row.floor() + dr).clamp(0.0, grid.max_row()))
        };
        self.center = next;
        next != old
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new(GridCoord::default(), DEFAULT_ZOOM)
    }
}

fn resolution_for(zoom: f64) -> f64 {
    2_f64.powf(-zoom)
}
