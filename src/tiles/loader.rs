use crate::{layers::source::Bitmap, Result};
use async_trait::async_trait;

/// Anything that can turn a source locator into a bitmap.
///
/// Loads run on the UI thread, so futures need not be `Send`.
#[async_trait(?Send)]
pub trait ImageLoader {
    /// Load the bitmap addressed by `locator`.
    async fn load(&self, locator: &str) -> Result<Bitmap>;
}

/// Loads and decodes images from the local filesystem.
///
/// Relative locators resolve against `base_dir`.
#[cfg(all(feature = "raster", feature = "tokio-runtime"))]
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    base_dir: std::path::PathBuf,
}

#[cfg(all(feature = "raster", feature = "tokio-runtime"))]
impl FileLoader {
    pub fn new(base_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

#[cfg(all(feature = "raster", feature = "tokio-runtime"))]
#[async_trait(?Send)]
impl ImageLoader for FileLoader {
    async fn load(&self, locator: &str) -> Result<Bitmap> {
        let path = self.base_dir.join(locator);
        log::debug!("reading image {}", path.display());
        let bytes = tokio::fs::read(&path).await?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Bitmap::from_rgba(image))
    }
}

/// Shared HTTP client with a custom User-Agent
#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
pub(crate) static HTTP_CLIENT: once_cell::sync::Lazy<reqwest::Client> =
    once_cell::sync::Lazy::new(|| {
        reqwest::Client::builder()
            .user_agent(concat!("tileview/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    });

/// Fetches images over HTTP and decodes them.
#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
#[derive(Debug, Clone, Default)]
pub struct HttpLoader {
    base_url: Option<String>,
}

#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
impl HttpLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative locators against `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }

    fn url_for(&self, locator: &str) -> String {
        match &self.base_url {
            Some(base) if !locator.contains("://") => {
                format!("{}/{}", base.trim_end_matches('/'), locator.trim_start_matches('/'))
            }
            _ => locator.to_string(),
        }
    }
}

#[cfg(all(feature = "raster", not(target_arch = "wasm32")))]
#[async_trait(?Send)]
impl ImageLoader for HttpLoader {
    async fn load(&self, locator: &str) -> Result<Bitmap> {
        let url = self.url_for(locator);
        log::debug!("fetching image {}", url);
        let resp = HTTP_CLIENT.get(&url).send().await?.error_for_status()?;
        let bytes = resp.bytes().await?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        log::info!("downloaded {} ({} bytes)", url, bytes.len());
        Ok(Bitmap::from_rgba(image))
    }
}
