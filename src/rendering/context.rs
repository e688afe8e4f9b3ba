use crate::{
    core::geo::{Point, Rect},
    layers::source::Bitmap,
    rendering::surface::{Surface, TextAlign, TextStyle},
    Result,
};

/// Commands recorded by a [`RenderContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    GlobalAlpha(f64),
    Bitmap {
        bitmap_size: (u32, u32),
        src: Rect,
        dst: Rect,
    },
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        line_width: f64,
    },
    Text {
        text: String,
        position: Point,
        align: TextAlign,
    },
}

/// Headless surface that records its drawing queue
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub width: f64,
    pub height: f64,
    /// Commands since the last clear
    pub drawing_queue: Vec<DrawCommand>,
    /// Number of clears seen, one per frame
    pub frame_count: u64,
}

impl RenderContext {
    /// Create a new render context
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            drawing_queue: Vec::new(),
            frame_count: 0,
        }
    }

    /// Source rectangles of every bitmap drawn this frame
    pub fn bitmap_sources(&self) -> Vec<Rect> {
        self.drawing_queue
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Bitmap { src, .. } => Some(*src),
                _ => None,
            })
            .collect()
    }

    /// Text drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.drawing_queue
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any fill this frame used `color`
    pub fn filled_with(&self, color: &str) -> bool {
        self.drawing_queue
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color: fill, .. } if fill == color))
    }
}

impl Surface for RenderContext {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.drawing_queue.clear();
        self.drawing_queue.push(DrawCommand::Clear);
        self.frame_count += 1;
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.drawing_queue.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Bitmap {
            bitmap_size: (bitmap.width, bitmap.height),
            src,
            dst,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<()> {
        self.drawing_queue.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<()> {
        self.drawing_queue.push(DrawCommand::StrokeRect {
            rect,
            color: color.to_string(),
            line_width,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, position: Point, style: TextStyle<'_>) -> Result<()> {
        self.drawing_queue.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            align: style.align,
        });
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_starts_new_frame() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "#000000").unwrap();
        ctx.clear().unwrap();
        assert_eq!(ctx.drawing_queue, vec![DrawCommand::Clear]);
        assert_eq!(ctx.frame_count, 1);
    }

    #[test]
    fn test_queries() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        ctx.clear().unwrap();
        let src = Rect::new(800.0, 0.0, 800.0, 600.0);
        ctx.draw_bitmap(&Bitmap::opaque(4000, 3000), src, src).unwrap();
        ctx.fill_rect(Rect::default(), "#402020").unwrap();
        let style = TextStyle {
            font: "12px monospace",
            color: "#ffffff",
            align: TextAlign::Left,
        };
        ctx.fill_text("hello", Point::new(1.0, 1.0), style).unwrap();

        assert_eq!(ctx.bitmap_sources(), vec![src]);
        assert_eq!(ctx.texts(), vec!["hello"]);
        assert!(ctx.filled_with("#402020"));
        assert!(!ctx.filled_with("#ffffff"));
    }
}
