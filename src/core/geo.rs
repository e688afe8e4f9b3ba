use serde::{Deserialize, Serialize};

/// A position on the tile grid, in fractional columns and rows.
///
/// The value is immutable: moving the view replaces it with a new
/// coordinate instead of editing it in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub col: f64,
    pub row: f64,
}

impl GridCoord {
    /// Creates a new grid coordinate
    pub fn new(col: f64, row: f64) -> Self {
        Self { col, row }
    }

    /// The integer tile containing this coordinate.
    ///
    /// `None` when either axis is NaN or infinite; such a coordinate lies
    /// in no tile.
    pub fn tile_index(&self) -> Option<TileIndex> {
        if !self.col.is_finite() || !self.row.is_finite() {
            return None;
        }
        Some(TileIndex::new(self.col.floor() as i64, self.row.floor() as i64))
    }

    /// Returns a copy with the column replaced
    pub fn with_col(self, col: f64) -> Self {
        Self { col, ..self }
    }

    /// Returns a copy with the row replaced
    pub fn with_row(self, row: f64) -> Self {
        Self { row, ..self }
    }
}

impl From<[f64; 2]> for GridCoord {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<GridCoord> for [f64; 2] {
    fn from(value: GridCoord) -> Self {
        [value.col, value.row]
    }
}

/// Integer address of one tile in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub col: i64,
    pub row: i64,
}

impl TileIndex {
    pub fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Column × row partition of a source bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Checks whether a tile index addresses a tile of this grid
    pub fn contains(&self, index: TileIndex) -> bool {
        index.col >= 0
            && index.row >= 0
            && index.col < self.columns as i64
            && index.row < self.rows as i64
    }

    /// Largest valid column index
    pub fn max_col(&self) -> f64 {
        self.columns.saturating_sub(1) as f64
    }

    /// Largest valid row index
    pub fn max_row(&self) -> f64 {
        self.rows.saturating_sub(1) as f64
    }
}

impl From<[u32; 2]> for GridSize {
    fn from(value: [u32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

/// Pixel size of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Represents a point in surface (screen) pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel rectangle of a tile inside its source bitmap
    pub fn for_tile(index: TileIndex, tile: TileSize) -> Self {
        Self::new(
            (index.col * tile.width as i64) as f64,
            (index.row * tile.height as i64) as f64,
            tile.width as f64,
            tile.height as f64,
        )
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}
