//! Preloading of layer sources.
//!
//! Every pending source is loaded once, concurrently, and reports an
//! explicit outcome. The returned report resolves once every source has
//! settled, whether it loaded or failed.

use crate::{
    layers::{source::SharedSource, tile::TileLayer},
    tiles::loader::ImageLoader,
};
use futures::future::join_all;
use serde::Serialize;
use std::rc::Rc;

/// How a single source load ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded {
        width: u32,
        height: u32,
        dimensions_match: bool,
    },
    Failed {
        error: String,
    },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Outcome of one source in a preload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    pub locator: String,
    pub outcome: LoadOutcome,
}

/// Completion signal of a preload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreloadReport {
    pub sources: Vec<SourceReport>,
}

impl PreloadReport {
    /// True when no source failed
    pub fn is_complete(&self) -> bool {
        self.sources.iter().all(|s| s.outcome.is_loaded())
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources.iter().filter(|s| !s.outcome.is_loaded())
    }

    pub fn loaded_count(&self) -> usize {
        self.sources.iter().filter(|s| s.outcome.is_loaded()).count()
    }
}

/// Sources of `layers` that still need loading, each listed once
pub fn pending_sources(layers: &[TileLayer]) -> Vec<SharedSource> {
    let mut pending: Vec<SharedSource> = Vec::new();
    for layer in layers {
        let source = layer.source();
        if source.borrow().is_loaded() || pending.iter().any(|p| Rc::ptr_eq(p, source)) {
            continue;
        }
        pending.push(source.clone());
    }
    pending
}

/// Loads every source and reports each outcome.
///
/// An empty list resolves immediately.
pub async fn preload(sources: Vec<SharedSource>, loader: &dyn ImageLoader) -> PreloadReport {
    if sources.is_empty() {
        return PreloadReport::default();
    }

    let locators: Vec<String> = sources
        .iter()
        .map(|s| s.borrow().locator().to_string())
        .collect();
    log::debug!("preloading {} source(s)", locators.len());

    let results = join_all(locators.iter().map(|locator| loader.load(locator))).await;

    let mut report = PreloadReport::default();
    for ((source, locator), result) in sources.iter().zip(locators).zip(results) {
        let outcome = match result {
            Ok(bitmap) => {
                let (width, height) = (bitmap.width, bitmap.height);
                let dimensions_match = source.borrow_mut().set_loaded(bitmap);
                LoadOutcome::Loaded {
                    width,
                    height,
                    dimensions_match,
                }
            }
            Err(err) => {
                log::error!("failed to load {}: {}", locator, err);
                LoadOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        report.sources.push(SourceReport { locator, outcome });
    }

    log::info!(
        "preload finished: {}/{} source(s) loaded",
        report.loaded_count(),
        report.sources.len()
    );
    report
}
