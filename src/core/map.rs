use crate::{
    core::{
        geo::{GridCoord, GridSize},
        view::View,
    },
    input::{Action, HoverZone, InputEvent, InputHandler},
    layers::{manager::LayerManager, source::SharedSource, tile::TileLayer},
    rendering::{
        pipeline::{render_frame, FrameSummary},
        surface::Surface,
    },
    tiles::{
        loader::ImageLoader,
        preload::{pending_sources, preload, PreloadReport},
    },
    MapError, Result,
};
use std::rc::Rc;

/// The map controller: owns a surface, a view and the layers.
///
/// A map does nothing until [`Map::initialize`] has attached to its
/// surface and preloaded every source. Before that, and after
/// [`Map::teardown`], rendering and input are no-ops.
pub struct Map {
    target: String,
    surface: Option<Box<dyn Surface>>,
    layer_manager: LayerManager,
    view: View,
    loader: Rc<dyn ImageLoader>,
    input_handler: InputHandler,
    initialized: bool,
    last_frame: Option<FrameSummary>,
}

impl Map {
    pub fn new(target: impl Into<String>, view: View, loader: Rc<dyn ImageLoader>) -> Self {
        Self {
            target: target.into(),
            surface: None,
            layer_manager: LayerManager::new(),
            view,
            loader,
            input_handler: InputHandler::new(),
            initialized: false,
            last_frame: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Attach the drawing surface resolved from the target
    pub fn attach_surface(&mut self, surface: Box<dyn Surface>) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&dyn Surface> {
        self.surface.as_deref()
    }

    /// Borrow the surface as a concrete type
    pub fn surface_as<T: 'static>(&self) -> Option<&T> {
        self.surface.as_deref()?.as_any().downcast_ref::<T>()
    }

    pub fn surface_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.surface.as_deref_mut()?.as_any_mut().downcast_mut::<T>()
    }

    pub fn loader(&self) -> Rc<dyn ImageLoader> {
        self.loader.clone()
    }

    /// Sources that still need loading
    pub fn pending_sources(&self) -> Vec<SharedSource> {
        pending_sources(self.layer_manager.layers())
    }

    /// Sources that still need loading, leaving out those in `seen`
    pub fn pending_sources_excluding(&self, seen: &[SharedSource]) -> Vec<SharedSource> {
        self.pending_sources()
            .into_iter()
            .filter(|source| !seen.iter().any(|s| Rc::ptr_eq(s, source)))
            .collect()
    }

    /// Preload every source, then enable rendering and draw the first frame.
    ///
    /// Without a surface the map stays uninitialized. A failed load does
    /// not block initialization; the report lists it and the layer is
    /// skipped while drawing.
    pub async fn initialize(&mut self) -> Result<PreloadReport> {
        if self.surface.is_none() {
            log::error!("map target '{}' not found, map left uninitialized", self.target);
            return Err(MapError::TargetNotFound(self.target.clone()));
        }

        let loader = self.loader.clone();
        let report = preload(self.pending_sources(), loader.as_ref()).await;
        self.complete_initialization(&report)?;
        Ok(report)
    }

    /// Finish initialization after the sources were preloaded elsewhere.
    ///
    /// Used by callers that cannot hold the map across the preload.
    pub fn complete_initialization(&mut self, report: &PreloadReport) -> Result<()> {
        if self.surface.is_none() {
            return Err(MapError::TargetNotFound(self.target.clone()));
        }
        for failure in report.failures() {
            log::warn!("layer source {} unavailable, it will not be drawn", failure.locator);
        }
        self.initialized = true;
        log::debug!("map '{}' initialized", self.target);
        self.render()?;
        Ok(())
    }

    /// Load any sources still missing (e.g. after a failed preload) and redraw
    pub async fn reload(&mut self) -> Result<PreloadReport> {
        if !self.initialized {
            return Ok(PreloadReport::default());
        }
        let loader = self.loader.clone();
        let report = preload(self.pending_sources(), loader.as_ref()).await;
        self.render()?;
        Ok(report)
    }

    /// Replace the whole view. Does not redraw.
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Copy of the current center
    pub fn center(&self) -> GridCoord {
        self.view.center()
    }

    /// Move the center without bounds checking. Does not redraw.
    pub fn set_center(&mut self, col: f64, row: f64) {
        self.view.set_center(GridCoord::new(col, row));
    }

    /// Add a layer on top; loads its source and redraws once initialized.
    pub async fn add_layer(&mut self, layer: TileLayer) -> Result<PreloadReport> {
        log::debug!("adding layer {}", layer.id());
        self.layer_manager.add_layer(layer)?;
        if !self.initialized {
            return Ok(PreloadReport::default());
        }
        self.reload().await
    }

    /// Add a layer without loading or drawing
    pub(crate) fn push_layer(&mut self, layer: TileLayer) -> Result<()> {
        self.layer_manager.add_layer(layer)
    }

    /// Remove a layer by id and redraw
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<TileLayer> {
        let layer = self
            .layer_manager
            .remove_layer(layer_id)
            .ok_or_else(|| MapError::LayerNotFound(layer_id.to_string()))?;
        log::debug!("removed layer {}", layer_id);
        self.render()?;
        Ok(layer)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&TileLayer> {
        self.layer_manager.get_layer(layer_id)
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut TileLayer) -> R,
    {
        self.layer_manager.with_layer_mut(layer_id, f)
    }

    pub fn layers(&self) -> &[TileLayer] {
        self.layer_manager.layers()
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layer_manager.list_layers()
    }

    /// An unused id for a layer added without one
    pub fn next_layer_id(&self) -> String {
        self.layer_manager.next_layer_id()
    }

    /// Grid that navigation is clamped to
    pub fn navigation_bounds(&self) -> Option<GridSize> {
        self.layer_manager.grid()
    }

    /// Redraw the whole surface. Returns `None` before initialization.
    pub fn render(&mut self) -> Result<Option<&FrameSummary>> {
        if !self.initialized {
            return Ok(None);
        }
        let Some(surface) = self.surface.as_deref_mut() else {
            return Ok(None);
        };
        let summary = render_frame(surface, self.layer_manager.layers(), &self.view)?;
        self.last_frame = Some(summary);
        Ok(self.last_frame.as_ref())
    }

    /// Summary of the most recent frame
    pub fn last_frame(&self) -> Option<&FrameSummary> {
        self.last_frame.as_ref()
    }

    /// Zone under the pointer after the last mouse move
    pub fn hover(&self) -> Option<HoverZone> {
        self.input_handler.hover()
    }

    /// Apply an input event. Returns whether the map redrew.
    ///
    /// Each event results in at most one redraw, even when it triggers
    /// several steps.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<bool> {
        if !self.initialized {
            return Ok(false);
        }
        let size = self.surface.as_deref().map(|s| s.size()).unwrap_or_default();
        let actions = self.input_handler.handle_event(&event, size);
        if actions.is_empty() {
            return Ok(false);
        }

        for action in actions {
            self.apply_action(action)?;
        }
        self.render()?;
        Ok(true)
    }

    /// Resize the surface and redraw
    pub fn resize(&mut self, width: f64, height: f64) -> Result<bool> {
        self.handle_input(InputEvent::Resize { width, height })
    }

    fn apply_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Move(direction) => match self.layer_manager.grid() {
                Some(grid) => {
                    let moved = self.view.step(direction, grid);
                    log::debug!("move {:?} -> {:?} (moved: {})", direction, self.view.center(), moved);
                }
                None => log::debug!("move {:?} ignored, map has no layers", direction),
            },
            Action::ZoomIn => {
                self.view.zoom_in();
                log::debug!("zoom in -> {}", self.view.zoom());
            }
            Action::ZoomOut => {
                self.view.zoom_out();
                log::debug!("zoom out -> {}", self.view.zoom());
            }
            Action::Resize { width, height } => {
                if let Some(surface) = self.surface.as_deref_mut() {
                    surface.set_size(width, height)?;
                }
            }
        }
        Ok(())
    }

    /// Stop rendering and handling input, and release the surface.
    ///
    /// The view and layers are kept; attaching a surface and initializing
    /// again brings the map back.
    pub fn teardown(&mut self) -> Option<Box<dyn Surface>> {
        log::debug!("tearing down map '{}'", self.target);
        self.initialized = false;
        self.last_frame = None;
        self.surface.take()
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("target", &self.target)
            .field("view", &self.view)
            .field("layers", &self.layer_manager.list_layers())
            .field("initialized", &self.initialized)
            .finish()
    }
}
