use async_trait::async_trait;
use std::path::Path;

use crate::core::errors::SauceError;
use crate::core::models::SauceReport;

#[async_trait]
pub trait SauceProvider: Send + Sync {
    async fn find_sauce_report(&self, image_path: &Path) -> Result<SauceReport, SauceError>;
}
