use std::path::Path;
use std::sync::Arc;

use crate::adapters::{GoogleImagesSauceProvider, SaucenaoSauceProvider};
use crate::core::errors::SauceError;
use crate::core::interfaces::adapters::{HttpTransport, SauceProvider};
use crate::core::models::{SauceBackend, SauceReport, SauceSettings};
use crate::global_constants;
use crate::presentation::{format_sauce_report, ReportMarkup};

pub struct SauceOrchestrator {
    google_images_provider: Arc<dyn SauceProvider>,
    saucenao_provider: Arc<dyn SauceProvider>,
    markup: ReportMarkup,
}

impl SauceOrchestrator {
    pub fn new(
        google_images_provider: Arc<dyn SauceProvider>,
        saucenao_provider: Arc<dyn SauceProvider>,
        markup: ReportMarkup,
    ) -> Self {
        Self {
            google_images_provider,
            saucenao_provider,
            markup,
        }
    }

    pub fn from_settings(
        http_transport: Arc<dyn HttpTransport>,
        settings: &SauceSettings,
        markup: ReportMarkup,
    ) -> Self {
        Self::new(
            Arc::new(GoogleImagesSauceProvider::from_settings(
                Arc::clone(&http_transport),
                settings,
            )),
            Arc::new(SaucenaoSauceProvider::from_settings(http_transport, settings)),
            markup,
        )
    }

    fn provider_for(&self, backend: SauceBackend) -> &Arc<dyn SauceProvider> {
        match backend {
            SauceBackend::GoogleImages => &self.google_images_provider,
            SauceBackend::Saucenao => &self.saucenao_provider,
        }
    }

    pub async fn resolve_report(
        &self,
        backend: SauceBackend,
        image_path: &Path,
    ) -> Result<SauceReport, SauceError> {
        log::info!(
            "{} Looking up sauce for {:?} via {}",
            global_constants::LOG_TAG_ORCHESTRATOR,
            image_path,
            backend
        );

        let result = self
            .provider_for(backend)
            .find_sauce_report(image_path)
            .await;

        match &result {
            Ok(_) => log::info!(
                "{} {} found sauce for {:?}",
                global_constants::LOG_TAG_ORCHESTRATOR,
                backend,
                image_path
            ),
            Err(error) => log::warn!(
                "{} {} lookup for {:?} failed: {}",
                global_constants::LOG_TAG_ORCHESTRATOR,
                backend,
                image_path,
                error
            ),
        }

        result
    }

    pub async fn resolve(&self, backend: SauceBackend, image_path: &Path) -> Result<String, SauceError> {
        let report = self.resolve_report(backend, image_path).await?;
        Ok(format_sauce_report(&report, self.markup))
    }
}
