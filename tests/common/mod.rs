#![allow(dead_code)]

use async_trait::async_trait;
use tileview::prelude::*;

/// Loader answering every locator with a 4000x3000 bitmap, except
/// `missing.png` which fails and `small.png` which is 1000x750
pub struct StubLoader;

#[async_trait(?Send)]
impl ImageLoader for StubLoader {
    async fn load(&self, locator: &str) -> Result<Bitmap> {
        if locator == "missing.png" {
            return Err(MapError::Load {
                locator: locator.to_string(),
                reason: "not found".to_string(),
            });
        }
        if locator == "small.png" {
            return Ok(Bitmap::opaque(1000, 750));
        }
        Ok(Bitmap::opaque(4000, 3000))
    }
}

/// Loader whose loads never settle
pub struct StalledLoader;

#[async_trait(?Send)]
impl ImageLoader for StalledLoader {
    async fn load(&self, _locator: &str) -> Result<Bitmap> {
        futures::future::pending::<Result<Bitmap>>().await
    }
}

pub fn world_map(center: (f64, f64)) -> Map {
    MapBuilder::new()
        .center(center.0, center.1)
        .layer(TileLayer::from_source("world", ImageSource::new("world.png")))
        .loader(StubLoader)
        .surface(RenderContext::new(800.0, 600.0))
        .build()
        .unwrap()
}

pub async fn ready_map(center: (f64, f64)) -> Map {
    let mut map = world_map(center);
    map.initialize().await.unwrap();
    map
}

pub fn recorder(map: &Map) -> &RenderContext {
    map.surface_as::<RenderContext>().unwrap()
}
