use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::errors::{without_query, SauceError};
use crate::core::interfaces::adapters::HttpTransport;
use crate::core::models::RequestSpec;
use crate::global_constants;

#[derive(Debug)]
pub struct StashedImage {
    path: PathBuf,
}

impl StashedImage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StashedImage {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            log::warn!(
                "{} Failed to remove {:?}: {}",
                global_constants::LOG_TAG_STASH,
                self.path,
                error
            );
        }
    }
}

pub struct RemoteImageStash {
    http_transport: Arc<dyn HttpTransport>,
    stash_dir: PathBuf,
    max_image_bytes: usize,
}

impl RemoteImageStash {
    pub fn new(http_transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_dir(http_transport, std::env::temp_dir())
    }

    pub fn with_dir(http_transport: Arc<dyn HttpTransport>, stash_dir: PathBuf) -> Self {
        Self {
            http_transport,
            stash_dir,
            max_image_bytes: global_constants::MAX_STASHED_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub fn is_remote(image: &str) -> bool {
        image.starts_with("http://") || image.starts_with("https://")
    }

    fn unique_path(&self) -> PathBuf {
        self.stash_dir.join(format!(
            "{}{}",
            global_constants::STASHED_IMAGE_PREFIX,
            Uuid::new_v4()
        ))
    }

    pub async fn fetch(&self, image_url: &str) -> Result<StashedImage, SauceError> {
        let response = self
            .http_transport
            .issue_request(&RequestSpec::get(image_url).with_body_limit(self.max_image_bytes))
            .await?;

        if !response.is_success() {
            return Err(SauceError::network(
                image_url,
                format!("HTTP {}", response.status),
            ));
        }

        if response.body().len() > self.max_image_bytes {
            return Err(SauceError::read(
                image_url,
                format!("body exceeds {} bytes", self.max_image_bytes),
            ));
        }

        let image_path = self.unique_path();
        log::debug!(
            "{} Saving {} to {:?}",
            global_constants::LOG_TAG_STASH,
            without_query(image_url),
            image_path
        );

        tokio::fs::write(&image_path, response.body())
            .await
            .map_err(|source| SauceError::Io {
                path: image_path.clone(),
                source,
            })?;

        Ok(StashedImage { path: image_path })
    }
}
