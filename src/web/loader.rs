use crate::{
    layers::source::{Bitmap, BitmapData},
    tiles::loader::ImageLoader,
    MapError, Result,
};
use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Loads images through `<img>` elements.
///
/// The load settles on the element's `load` or `error` event, so a
/// failed request is reported instead of leaving the preload waiting.
#[derive(Debug, Clone, Default)]
pub struct HtmlImageLoader {
    cross_origin: Option<String>,
}

impl HtmlImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request images with the given CORS mode (e.g. `"anonymous"`)
    pub fn with_cross_origin(mode: impl Into<String>) -> Self {
        Self {
            cross_origin: Some(mode.into()),
        }
    }
}

#[async_trait(?Send)]
impl ImageLoader for HtmlImageLoader {
    async fn load(&self, locator: &str) -> Result<Bitmap> {
        let image = HtmlImageElement::new()?;
        if let Some(mode) = &self.cross_origin {
            image.set_cross_origin(Some(mode));
        }

        let settled = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(locator);

        let result = JsFuture::from(settled).await;
        image.set_onload(None);
        image.set_onerror(None);
        result.map_err(|_| MapError::Load {
            locator: locator.to_string(),
            reason: "image element reported an error".to_string(),
        })?;

        log::info!(
            "loaded {} ({}x{})",
            locator,
            image.natural_width(),
            image.natural_height()
        );
        Ok(Bitmap {
            width: image.natural_width(),
            height: image.natural_height(),
            data: BitmapData::Element(image),
        })
    }
}
