use crate::{
    core::geo::{Point, Rect},
    layers::source::Bitmap,
    Result,
};

/// Horizontal anchoring of drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Font, colour and alignment for [`Surface::fill_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub align: TextAlign,
}

/// A 2D drawing target.
///
/// Colours are CSS hex strings (`#rrggbb`). The map draws exactly one
/// frame per redraw through this interface.
pub trait Surface {
    /// Current width and height in pixels
    fn size(&self) -> (f64, f64);

    /// Resize the drawing area
    fn set_size(&mut self, width: f64, height: f64) -> Result<()>;

    /// Erase everything drawn so far
    fn clear(&mut self) -> Result<()>;

    /// Opacity applied to subsequent draws, in [0, 1]
    fn set_global_alpha(&mut self, alpha: f64);

    /// Draw the `src` region of `bitmap` scaled into `dst`
    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<()>;

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<()>;

    fn fill_text(&mut self, text: &str, position: Point, style: TextStyle<'_>) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
