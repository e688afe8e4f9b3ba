use crate::{
    core::geo::{Point, Rect},
    layers::source::{Bitmap, BitmapData},
    rendering::surface::{Surface, TextAlign, TextStyle},
    MapError, Result,
};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Surface drawing into an HTML `<canvas>` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| MapError::Render("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| MapError::Render("unexpected 2d context type".to_string()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) -> Result<()> {
        let BitmapData::Element(image) = &bitmap.data else {
            return Err(MapError::Render(
                "canvas surface needs an image element".to_string(),
            ));
        };
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image, src.x, src.y, src.width, src.height, dst.x, dst.y, dst.width, dst.height,
            )?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<()> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<()> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, position: Point, style: TextStyle<'_>) -> Result<()> {
        self.ctx.set_font(style.font);
        self.ctx.set_fill_style_str(style.color);
        match style.align {
            TextAlign::Left => {
                self.ctx.set_text_align("left");
                self.ctx.set_text_baseline("alphabetic");
            }
            TextAlign::Center => {
                self.ctx.set_text_align("center");
                self.ctx.set_text_baseline("middle");
            }
        }
        self.ctx.fill_text(text, position.x, position.y)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
