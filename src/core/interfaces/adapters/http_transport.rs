use async_trait::async_trait;

use crate::core::errors::SauceError;
use crate::core::models::{HttpResponse, RequestSpec};

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn issue_request(&self, spec: &RequestSpec) -> Result<HttpResponse, SauceError>;
}
