//! The render pass: one synchronous frame per redraw.

use crate::{
    core::{
        constants::{
            ERROR_BACKGROUND, ERROR_FONT, ERROR_TEXT_COLOR, OVERLAY_FONT, OVERLAY_LINE_HEIGHT,
            OVERLAY_MARGIN, OVERLAY_TEXT_COLOR, TILE_BORDER_COLOR, TILE_BORDER_WIDTH,
        },
        geo::{GridSize, Point, Rect, TileIndex, TileSize},
        view::View,
    },
    layers::tile::TileLayer,
    rendering::surface::{Surface, TextAlign, TextStyle},
    Result,
};

/// What a single layer contributed to a frame
#[derive(Debug, Clone, PartialEq)]
pub enum LayerPass {
    /// The tile was cropped from `src` and drawn into `dst`
    Tile {
        layer_id: String,
        index: TileIndex,
        src: Rect,
        dst: Rect,
    },
    /// The view pointed outside the grid; the error screen was drawn.
    /// `index` is `None` when the center was not a finite coordinate.
    OutOfBounds {
        layer_id: String,
        index: Option<TileIndex>,
    },
}

/// Summary of one rendered frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSummary {
    pub passes: Vec<LayerPass>,
}

impl FrameSummary {
    pub fn is_out_of_bounds(&self) -> bool {
        self.passes
            .iter()
            .any(|p| matches!(p, LayerPass::OutOfBounds { .. }))
    }
}

/// Largest uniform scale that fits a tile in the surface, and the
/// centered destination rectangle.
pub fn fit_tile(tile: TileSize, surface: (f64, f64)) -> (f64, Rect) {
    let (sw, sh) = surface;
    let scale = (sw / tile.width as f64).min(sh / tile.height as f64);
    let (w, h) = (tile.width as f64 * scale, tile.height as f64 * scale);
    (scale, Rect::new((sw - w) / 2.0, (sh - h) / 2.0, w, h))
}

/// Lines of the debug overlay
pub fn overlay_lines(index: TileIndex, view: &View, grid: GridSize) -> Vec<String> {
    let center = view.center();
    vec![
        format!("Tile: {}", index),
        format!("Zoom: {:.1} (resolution {:.4})", view.zoom(), view.resolution()),
        format!("Center: ({:.2}, {:.2})", center.col, center.row),
        format!(
            "Grid: {} x {} (cols 0-{}, rows 0-{})",
            grid.columns,
            grid.rows,
            grid.max_col(),
            grid.max_row()
        ),
        "Arrows / click edges: move | +/-: zoom".to_string(),
    ]
}

/// Clear the surface and draw every visible, loaded layer in order.
pub fn render_frame(
    surface: &mut dyn Surface,
    layers: &[TileLayer],
    view: &View,
) -> Result<FrameSummary> {
    surface.clear()?;
    let mut summary = FrameSummary::default();
    let center = view.center();
    let index = center.tile_index();

    for layer in layers.iter().filter(|l| l.is_visible()) {
        let source = layer.source().borrow();
        let Some(bitmap) = source.bitmap() else {
            continue;
        };
        let grid = source.grid();

        let Some(index) = index.filter(|i| grid.contains(*i)) else {
            let label = match index {
                Some(index) => index.to_string(),
                None => format!("({}, {})", center.col, center.row),
            };
            draw_out_of_bounds(surface, &label)?;
            summary.passes.push(LayerPass::OutOfBounds {
                layer_id: layer.id().to_string(),
                index,
            });
            continue;
        };

        let tile = source.tile_size();
        let src = Rect::for_tile(index, tile);
        let (_, dst) = fit_tile(tile, surface.size());

        surface.set_global_alpha(layer.opacity());
        surface.draw_bitmap(bitmap, src, dst)?;
        surface.stroke_rect(dst, TILE_BORDER_COLOR, TILE_BORDER_WIDTH)?;
        surface.set_global_alpha(1.0);
        draw_overlay(surface, &overlay_lines(index, view, grid))?;

        summary.passes.push(LayerPass::Tile {
            layer_id: layer.id().to_string(),
            index,
            src,
            dst,
        });
    }

    log::trace!("frame drawn: {:?}", summary.passes);
    Ok(summary)
}

fn draw_overlay(surface: &mut dyn Surface, lines: &[String]) -> Result<()> {
    let style = TextStyle {
        font: OVERLAY_FONT,
        color: OVERLAY_TEXT_COLOR,
        align: TextAlign::Left,
    };
    for (i, line) in lines.iter().enumerate() {
        let y = OVERLAY_MARGIN + OVERLAY_LINE_HEIGHT * (i as f64 + 1.0);
        surface.fill_text(line, Point::new(OVERLAY_MARGIN, y), style)?;
    }
    Ok(())
}

fn draw_out_of_bounds(surface: &mut dyn Surface, label: &str) -> Result<()> {
    let (w, h) = surface.size();
    let bounds = Rect::new(0.0, 0.0, w, h);
    surface.fill_rect(bounds, ERROR_BACKGROUND)?;
    let style = TextStyle {
        font: ERROR_FONT,
        color: ERROR_TEXT_COLOR,
        align: TextAlign::Center,
    };
    surface.fill_text(
        &format!("Out of bounds: tile {}", label),
        bounds.center(),
        style,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::GridCoord,
        layers::source::{Bitmap, ImageSource},
        rendering::context::{DrawCommand, RenderContext},
    };

    fn loaded_layer(id: &str) -> TileLayer {
        let mut source = ImageSource::new(format!("{id}.png"));
        source.set_loaded(Bitmap::opaque(4000, 3000));
        TileLayer::from_source(id, source)
    }

    #[test]
    fn test_fit_tile_letterboxes() {
        let tile = TileSize::new(800, 600);
        let (scale, dst) = fit_tile(tile, (1600.0, 600.0));
        assert_eq!(scale, 1.0);
        assert_eq!(dst, Rect::new(400.0, 0.0, 800.0, 600.0));

        let (scale, dst) = fit_tile(tile, (400.0, 1000.0));
        assert_eq!(scale, 0.5);
        assert_eq!(dst, Rect::new(0.0, 350.0, 400.0, 300.0));
    }

    #[test]
    fn test_origin_tile_crops_first_rect() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let view = View::default();
        let summary = render_frame(&mut ctx, &[loaded_layer("a")], &view).unwrap();

        assert_eq!(ctx.bitmap_sources(), vec![Rect::new(0.0, 0.0, 800.0, 600.0)]);
        assert!(!summary.is_out_of_bounds());
    }

    #[test]
    fn test_every_tile_crops_its_rect() {
        for col in 0..5 {
            for row in 0..5 {
                let mut ctx = RenderContext::new(1024.0, 768.0);
                let view = View::new(GridCoord::new(col as f64 + 0.5, row as f64), 1.0);
                render_frame(&mut ctx, &[loaded_layer("a")], &view).unwrap();
                assert_eq!(
                    ctx.bitmap_sources(),
                    vec![Rect::new(col as f64 * 800.0, row as f64 * 600.0, 800.0, 600.0)]
                );
            }
        }
    }

    #[test]
    fn test_draw_sequence_for_tile() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let layer = loaded_layer("a").with_opacity(0.4);
        render_frame(&mut ctx, &[layer], &View::new(GridCoord::new(2.0, 2.0), 1.0)).unwrap();

        let dst = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(ctx.drawing_queue[0], DrawCommand::Clear);
        assert_eq!(ctx.drawing_queue[1], DrawCommand::GlobalAlpha(0.4));
        assert_eq!(
            ctx.drawing_queue[2],
            DrawCommand::Bitmap {
                bitmap_size: (4000, 3000),
                src: Rect::new(1600.0, 1200.0, 800.0, 600.0),
                dst,
            }
        );
        assert_eq!(
            ctx.drawing_queue[3],
            DrawCommand::StrokeRect {
                rect: dst,
                color: TILE_BORDER_COLOR.to_string(),
                line_width: TILE_BORDER_WIDTH,
            }
        );
        assert_eq!(ctx.drawing_queue[4], DrawCommand::GlobalAlpha(1.0));
        assert!(ctx.texts().contains(&"Tile: (2, 2)"));
        assert!(!ctx.filled_with(ERROR_BACKGROUND));
    }

    #[test]
    fn test_out_of_bounds_draws_error_screen() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let view = View::new(GridCoord::new(10.0, 10.0), 1.0);
        let summary = render_frame(&mut ctx, &[loaded_layer("a")], &view).unwrap();

        assert!(summary.is_out_of_bounds());
        assert!(ctx.filled_with(ERROR_BACKGROUND));
        assert!(ctx.bitmap_sources().is_empty());
        assert_eq!(ctx.texts(), vec!["Out of bounds: tile (10, 10)"]);
    }

    #[test]
    fn test_nan_center_draws_error_screen() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let view = View::new(GridCoord::new(f64::NAN, f64::NAN), 1.0);
        let summary = render_frame(&mut ctx, &[loaded_layer("a")], &view).unwrap();

        assert_eq!(
            summary.passes,
            vec![LayerPass::OutOfBounds {
                layer_id: "a".to_string(),
                index: None,
            }]
        );
        assert!(ctx.filled_with(ERROR_BACKGROUND));
        assert!(ctx.bitmap_sources().is_empty());
        assert_eq!(ctx.texts(), vec!["Out of bounds: tile (NaN, NaN)"]);
    }

    #[test]
    fn test_hidden_and_unloaded_layers_skipped() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let hidden = loaded_layer("hidden").with_visible(false);
        let unloaded = TileLayer::from_source("unloaded", ImageSource::new("u.png"));
        let summary = render_frame(&mut ctx, &[hidden, unloaded], &View::default()).unwrap();

        assert!(summary.passes.is_empty());
        assert_eq!(ctx.drawing_queue, vec![DrawCommand::Clear]);
    }

    #[test]
    fn test_later_layers_drawn_on_top() {
        let mut ctx = RenderContext::new(800.0, 600.0);
        let summary = render_frame(
            &mut ctx,
            &[loaded_layer("bottom"), loaded_layer("top")],
            &View::default(),
        )
        .unwrap();
        let ids: Vec<_> = summary
            .passes
            .iter()
            .map(|p| match p {
                LayerPass::Tile { layer_id, .. } => layer_id.as_str(),
                LayerPass::OutOfBounds { layer_id, .. } => layer_id.as_str(),
            })
            .collect();
        assert_eq!(ids, vec!["bottom", "top"]);
    }

    #[test]
    fn test_overlay_mentions_zoom_and_grid() {
        let view = View::new(GridCoord::new(1.0, 3.0), 2.0);
        let lines = overlay_lines(TileIndex::new(1, 3), &view, GridSize::new(5, 5));
        assert_eq!(lines[0], "Tile: (1, 3)");
        assert_eq!(lines[1], "Zoom: 2.0 (resolution 0.2500)");
        assert_eq!(lines[2], "Center: (1.00, 3.00)");
        assert_eq!(lines[3], "Grid: 5 x 5 (cols 0-4, rows 0-4)");
    }
}
