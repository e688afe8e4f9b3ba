//! Software surface backed by an RGBA buffer.
//!
//! Used by the native viewer to produce PNG frames. Glyph rasterising is
//! out of reach without a font stack, so text is kept as a list of lines
//! instead of being painted.

use crate::{
    core::geo::{Point, Rect},
    layers::source::Bitmap,
    rendering::surface::{Surface, TextStyle},
    MapError, Result,
};
use image::{imageops, Rgba, RgbaImage};

/// Parse a `#rrggbb` or `#rrggbbaa` colour
pub fn parse_hex_color(color: &str) -> Result<Rgba<u8>> {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| MapError::Render(format!("invalid colour {}", color)))
    };
    match hex.len() {
        6 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => Err(MapError::Render(format!("invalid colour {}", color))),
    }
}

/// RGBA pixel surface
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    alpha: f64,
    text_lines: Vec<(String, Point)>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            alpha: 1.0,
            text_lines: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Text requested since the last clear
    pub fn text_lines(&self) -> &[(String, Point)] {
        &self.text_lines
    }

    /// Write the current frame as an image file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.pixels.save(path)?;
        Ok(())
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.pixels.width() as i64 || y >= self.pixels.height() as i64 {
            return;
        }
        let a = (color.0[3] as f64 / 255.0) * self.alpha;
        let dst = self.pixels.get_pixel_mut(x as u32, y as u32);
        for i in 0..3 {
            dst.0[i] = (color.0[i] as f64 * a + dst.0[i] as f64 * (1.0 - a)).round() as u8;
        }
        let out_a = a + (dst.0[3] as f64 / 255.0) * (1.0 - a);
        dst.0[3] = (out_a * 255.0).round() as u8;
    }

    fn fill_area(&mut self, rect: Rect, color: Rgba<u8>) {
        let x0 = rect.x.round() as i64;
        let y0 = rect.y.round() as i64;
        let x1 = (rect.x + rect.width).round() as i64;
        let y1 = (rect.y + rect.height).round() as i64;
        for y in y0.max(0)..y1.min(self.pixels.height() as i64) {
            for x in x0.max(0)..x1.min(self.pixels.width() as i64) {
                self.blend(x, y, color);
            }
        }
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (f64, f64) {
        (self.pixels.width() as f64, self.pixels.height() as f64)
    }

    fn set_size(&mut self, width: f64, height: f64) -> Result<()> {
        self.pixels = RgbaImage::new(width.max(0.0) as u32, height.max(0.0) as u32);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
        self.text_lines.clear();
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) -> Result<()> {
        let source = bitmap
            .as_rgba()
            .ok_or_else(|| MapError::Render("raster surface needs decoded pixels".to_string()))?;

        let crop = imageops::crop_imm(
            source,
            src.x.max(0.0) as u32,
            src.y.max(0.0) as u32,
            src.width as u32,
            src.height as u32,
        )
        .to_image();
        let (w, h) = (dst.width.round() as u32, dst.height.round() as u32);
        if w == 0 || h == 0 || crop.width() == 0 || crop.height() == 0 {
            return Ok(());
        }
        let scaled = imageops::resize(&crop, w, h, imageops::FilterType::Triangle);

        let (ox, oy) = (dst.x.round() as i64, dst.y.round() as i64);
        for (x, y, pixel) in scaled.enumerate_pixels() {
            self.blend(ox + x as i64, oy + y as i64, *pixel);
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<()> {
        let color = parse_hex_color(color)?;
        self.fill_area(rect, color);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<()> {
        let color = parse_hex_color(color)?;
        let half = line_width / 2.0;
        let (left, top) = (rect.x - half, rect.y - half);
        let outer_w = rect.width + line_width;

        self.fill_area(Rect::new(left, top, outer_w, line_width), color);
        self.fill_area(
            Rect::new(left, rect.y + rect.height - half, outer_w, line_width),
            color,
        );
        self.fill_area(
            Rect::new(left, rect.y + half, line_width, rect.height - line_width),
            color,
        );
        self.fill_area(
            Rect::new(rect.x + rect.width - half, rect.y + half, line_width, rect.height - line_width),
            color,
        );
        Ok(())
    }

    fn fill_text(&mut self, text: &str, position: Point, _style: TextStyle<'_>) -> Result<()> {
        log::trace!("text at ({:.0}, {:.0}): {}", position.x, position.y, text);
        self.text_lines.push((text.to_string(), position));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
