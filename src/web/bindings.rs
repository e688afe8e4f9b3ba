//! JavaScript-facing map handle.
//!
//! `WebMap` resolves its target element, draws into a canvas and wires
//! the DOM listeners. The map lives behind `Rc<RefCell<_>>` so listeners
//! and load futures can reach it; no borrow is held across an await.

use crate::{
    core::{
        builder::MapBuilder,
        config::{LayerOptions, MapOptions, ViewOptions},
        constants::{TILE_HEIGHT, TILE_WIDTH},
        geo::Point,
        map::Map,
    },
    input::{InputEvent, KeyCode},
    layers::tile::TileLayer,
    tiles::preload::{preload, PreloadReport},
    web::{canvas::CanvasSurface, listeners::Subscriptions, loader::HtmlImageLoader},
    MapError,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Window};

fn js_error(err: MapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn report_to_js(report: &PreloadReport) -> Result<JsValue, JsValue> {
    serde_json::to_string(report)
        .map(|json| JsValue::from_str(&json))
        .map_err(|err| js_error(err.into()))
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error(MapError::Js("no global window".to_string())))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| js_error(MapError::Js("no document on window".to_string())))
}

/// Size of `element` in CSS pixels, falling back to one tile
fn client_size(element: &HtmlElement) -> (f64, f64) {
    let (w, h) = (element.client_width(), element.client_height());
    if w > 0 && h > 0 {
        (w as f64, h as f64)
    } else {
        (TILE_WIDTH as f64, TILE_HEIGHT as f64)
    }
}

/// Pointer position in canvas pixels
fn canvas_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> Point {
    let (client_w, client_h) = (canvas.client_width() as f64, canvas.client_height() as f64);
    let scale_x = if client_w > 0.0 { canvas.width() as f64 / client_w } else { 1.0 };
    let scale_y = if client_h > 0.0 { canvas.height() as f64 / client_h } else { 1.0 };
    Point::new(
        event.offset_x() as f64 * scale_x,
        event.offset_y() as f64 * scale_y,
    )
}

/// Run `f` on the map unless it is already borrowed
fn with_map<R>(map: &Rc<RefCell<Map>>, f: impl FnOnce(&mut Map) -> R) -> Option<R> {
    match map.try_borrow_mut() {
        Ok(mut map) => Some(f(&mut map)),
        Err(_) => {
            log::debug!("map busy, event dropped");
            None
        }
    }
}

/// Where the map draws
struct Mount {
    /// Element whose size the canvas follows
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    /// Whether the canvas was created by the map and must be removed on teardown
    owns_canvas: bool,
}

impl Mount {
    fn resolve(target: &str) -> Result<Option<Self>, JsValue> {
        let document = document()?;
        let Some(element) = document.get_element_by_id(target) else {
            return Ok(None);
        };

        let mount = match element.dyn_into::<HtmlCanvasElement>() {
            Ok(canvas) => {
                let container = canvas
                    .parent_element()
                    .and_then(|p| p.dyn_into::<HtmlElement>().ok())
                    .unwrap_or_else(|| canvas.clone().unchecked_into());
                Mount {
                    container,
                    canvas,
                    owns_canvas: false,
                }
            }
            Err(element) => {
                let container: HtmlElement = element
                    .dyn_into()
                    .map_err(|_| js_error(MapError::TargetNotFound(target.to_string())))?;
                let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
                canvas.style().set_property("display", "block")?;
                container.append_child(&canvas)?;
                Mount {
                    container,
                    canvas,
                    owns_canvas: true,
                }
            }
        };

        let (width, height) = client_size(&mount.container);
        mount.canvas.set_width(width as u32);
        mount.canvas.set_height(height as u32);
        Ok(Some(mount))
    }
}

/// A tile map bound to a DOM element
#[wasm_bindgen]
pub struct WebMap {
    map: Rc<RefCell<Map>>,
    mount: Option<Mount>,
    subscriptions: Subscriptions,
}

#[wasm_bindgen]
impl WebMap {
    /// Create a map from JSON options.
    ///
    /// A missing target element is logged; the map is still returned but
    /// never initializes.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str) -> Result<WebMap, JsValue> {
        let options = MapOptions::from_json(options_json).map_err(js_error)?;
        let mount = Mount::resolve(&options.target)?;

        let mut builder = MapBuilder::from_options(options.clone()).loader(HtmlImageLoader::new());
        match &mount {
            Some(mount) => {
                builder = builder.surface(CanvasSurface::new(mount.canvas.clone()).map_err(js_error)?);
            }
            None => log::error!("map target '{}' not found", options.target),
        }
        let map = builder.build().map_err(js_error)?;

        Ok(WebMap {
            map: Rc::new(RefCell::new(map)),
            mount,
            subscriptions: Subscriptions::new(),
        })
    }

    /// Subscribe to DOM events and preload every source.
    ///
    /// Resolves with the preload report as JSON once the first frame is
    /// drawn. Rejects when the target was not found.
    pub fn init(&mut self) -> Result<js_sys::Promise, JsValue> {
        if self.mount.is_none() {
            let target = self.map.borrow().target().to_string();
            log::error!("map target '{}' not found, map left uninitialized", target);
            return Err(js_error(MapError::TargetNotFound(target)));
        }
        if self.subscriptions.is_empty() {
            self.subscribe()?;
        }

        let map = self.map.clone();
        let (sources, loader) = {
            let map = map.borrow();
            (map.pending_sources(), map.loader())
        };
        Ok(future_to_promise(async move {
            let first = sources.clone();
            let mut report = preload(sources, loader.as_ref()).await;
            map.borrow_mut()
                .complete_initialization(&report)
                .map_err(js_error)?;

            // layers added while the first preload was running
            let late = map.borrow().pending_sources_excluding(&first);
            if !late.is_empty() {
                let extra = preload(late, loader.as_ref()).await;
                map.borrow_mut().render().map_err(js_error)?;
                report.sources.extend(extra.sources);
            }
            report_to_js(&report)
        }))
    }

    /// Retry every source that is still unloaded, e.g. after a failed load.
    ///
    /// Resolves with the load report once redrawn; an empty report before
    /// `init` has finished.
    pub fn reload(&self) -> js_sys::Promise {
        let map = self.map.clone();
        let (sources, loader) = {
            let map = map.borrow();
            let sources = if map.is_initialized() { map.pending_sources() } else { Vec::new() };
            (sources, map.loader())
        };
        future_to_promise(async move {
            let report = preload(sources, loader.as_ref()).await;
            map.borrow_mut().render().map_err(js_error)?;
            report_to_js(&report)
        })
    }

    fn subscribe(&mut self) -> Result<(), JsValue> {
        let Some(mount) = &self.mount else {
            return Ok(());
        };

        let map = self.map.clone();
        let container = mount.container.clone();
        self.subscriptions.listen(&window()?, "resize", move |_: Event| {
            let (width, height) = client_size(&container);
            if let Some(Err(err)) = with_map(&map, |m| m.resize(width, height)) {
                log::error!("resize failed: {}", err);
            }
        })
        .map_err(js_error)?;

        let map = self.map.clone();
        self.subscriptions.listen(&document()?, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = KeyCode::from_key(&event.key());
            if key == KeyCode::Other {
                return;
            }
            event.prevent_default();
            if let Some(Err(err)) = with_map(&map, |m| m.handle_input(InputEvent::KeyPress { key })) {
                log::error!("key {:?} failed: {}", key, err);
            }
        })
        .map_err(js_error)?;

        let map = self.map.clone();
        let canvas = mount.canvas.clone();
        self.subscriptions.listen(&mount.canvas, "click", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let position = canvas_position(&canvas, event);
            if let Some(Err(err)) = with_map(&map, |m| m.handle_input(InputEvent::Click { position })) {
                log::error!("click failed: {}", err);
            }
        })
        .map_err(js_error)?;

        let map = self.map.clone();
        let canvas = mount.canvas.clone();
        self.subscriptions.listen(&mount.canvas, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let position = canvas_position(&canvas, event);
            let clickable = with_map(&map, |m| {
                if let Err(err) = m.handle_input(InputEvent::MouseMove { position }) {
                    log::error!("mouse move failed: {}", err);
                }
                m.hover().is_some_and(|zone| zone.is_clickable())
            });
            if let Some(clickable) = clickable {
                let cursor = if clickable { "pointer" } else { "default" };
                if let Err(err) = canvas.style().set_property("cursor", cursor) {
                    log::warn!("failed to set cursor: {:?}", err);
                }
            }
        })
        .map_err(js_error)?;

        log::debug!("subscribed {} listeners", self.subscriptions.len());
        Ok(())
    }

    /// Redraw the current tile
    pub fn render(&self) -> Result<(), JsValue> {
        self.map.borrow_mut().render().map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = setCenter)]
    pub fn set_center(&self, col: f64, row: f64) {
        self.map.borrow_mut().set_center(col, row);
    }

    /// Current center as `[col, row]`
    #[wasm_bindgen(js_name = getCenter)]
    pub fn get_center(&self) -> Vec<f64> {
        let center = self.map.borrow().center();
        vec![center.col, center.row]
    }

    #[wasm_bindgen(js_name = getZoom)]
    pub fn get_zoom(&self) -> f64 {
        self.map.borrow().view().zoom()
    }

    /// Replace the view from JSON view options
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&self, view_json: &str) -> Result<(), JsValue> {
        let options: ViewOptions =
            serde_json::from_str(view_json).map_err(|err| js_error(err.into()))?;
        self.map.borrow_mut().set_view(options.build());
        Ok(())
    }

    /// Add a layer from JSON layer options.
    ///
    /// Resolves with the load report of the new source once redrawn.
    #[wasm_bindgen(js_name = addLayer)]
    pub fn add_layer(&self, layer_json: &str) -> Result<js_sys::Promise, JsValue> {
        let options: LayerOptions =
            serde_json::from_str(layer_json).map_err(|err| js_error(err.into()))?;

        let (sources, loader) = {
            let mut map = self.map.borrow_mut();
            let id = options.id.clone().unwrap_or_else(|| map.next_layer_id());
            let layer = TileLayer::new(id, options.source.build().shared())
                .with_opacity(options.opacity)
                .with_visible(options.visible);
            map.push_layer(layer).map_err(js_error)?;
            // before init, the initial preload picks the source up
            let sources = if map.is_initialized() { map.pending_sources() } else { Vec::new() };
            (sources, map.loader())
        };

        let map = self.map.clone();
        Ok(future_to_promise(async move {
            let report = preload(sources, loader.as_ref()).await;
            map.borrow_mut().render().map_err(js_error)?;
            report_to_js(&report)
        }))
    }

    #[wasm_bindgen(js_name = removeLayer)]
    pub fn remove_layer(&self, layer_id: &str) -> Result<(), JsValue> {
        self.map.borrow_mut().remove_layer(layer_id).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = listLayers)]
    pub fn list_layers(&self) -> Vec<String> {
        self.map.borrow().list_layers()
    }

    #[wasm_bindgen(js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.map.borrow().is_initialized()
    }

    /// Remove every listener and stop drawing. Safe to call twice.
    pub fn teardown(&mut self) {
        self.subscriptions.clear();
        self.map.borrow_mut().teardown();
        if let Some(mount) = self.mount.take() {
            if mount.owns_canvas {
                mount.canvas.remove();
            }
        }
    }
}

/// Installs the panic hook and the console logger
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    crate::web::logger::init(log::LevelFilter::Info);
}
