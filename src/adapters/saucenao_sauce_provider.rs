use async_trait::async_trait;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::sync::Arc;

use crate::core::errors::SauceError;
use crate::core::interfaces::adapters::{HttpTransport, SauceProvider};
use crate::core::models::{
    RankedResultSet, RequestSpec, SauceBackend, SauceReport, SauceSettings, SimilarityMatch,
};
use crate::global_constants;

#[derive(Debug, Deserialize)]
struct SaucenaoResponse {
    #[serde(default)]
    results: Option<Vec<SaucenaoEntry>>,
}

#[derive(Debug, Deserialize)]
struct SaucenaoEntry {
    header: SaucenaoHeader,
    #[serde(default)]
    data: SaucenaoData,
}

#[derive(Debug, Deserialize)]
struct SaucenaoHeader {
    #[serde(deserialize_with = "deserialize_similarity")]
    similarity: f64,
}

#[derive(Debug, Default, Deserialize)]
struct SaucenaoData {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ext_urls: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericValue {
    Text(String),
    Number(f64),
}

// The API sends similarity as a string such as "87.15".
fn deserialize_similarity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let similarity = match NumericValue::deserialize(deserializer)? {
        NumericValue::Text(text) => text.trim().parse::<f64>().map_err(D::Error::custom)?,
        NumericValue::Number(number) => number,
    };

    if !similarity.is_finite() {
        return Err(D::Error::custom("similarity must be a finite number"));
    }

    Ok(similarity)
}

impl From<SaucenaoEntry> for SimilarityMatch {
    fn from(entry: SaucenaoEntry) -> Self {
        SimilarityMatch {
            similarity: entry.header.similarity,
            title: entry.data.title.unwrap_or_default(),
            source_urls: entry.data.ext_urls.unwrap_or_default(),
        }
    }
}

pub struct SaucenaoSauceProvider {
    http_transport: Arc<dyn HttpTransport>,
    search_url: String,
    api_token: String,
}

impl SaucenaoSauceProvider {
    pub fn new(http_transport: Arc<dyn HttpTransport>, search_url: String, api_token: String) -> Self {
        Self {
            http_transport,
            search_url,
            api_token,
        }
    }

    pub fn from_settings(http_transport: Arc<dyn HttpTransport>, settings: &SauceSettings) -> Self {
        Self::new(
            http_transport,
            settings.saucenao_search_url.clone(),
            settings.saucenao_token.clone(),
        )
    }

    fn construct_api_url(&self) -> String {
        format!(
            "{}{}",
            self.search_url,
            urlencoding::encode(&self.api_token)
        )
    }

    pub async fn find_sauce(&self, image_path: &Path) -> Result<RankedResultSet, SauceError> {
        log::debug!(
            "{} Uploading {:?}",
            global_constants::LOG_TAG_SAUCENAO,
            image_path
        );

        let upload = RequestSpec::post(self.construct_api_url())
            .with_file_upload(image_path, global_constants::SAUCENAO_UPLOAD_FIELD_NAME);

        let response = self
            .http_transport
            .issue_request(&upload)
            .await
            .map_err(|error| match error {
                read_error @ SauceError::Read { .. } => read_error,
                other => SauceError::upload(SauceBackend::Saucenao, other),
            })?;

        log::debug!(
            "{} HTTP {} with {} body bytes",
            global_constants::LOG_TAG_SAUCENAO,
            response.status,
            response.body().len()
        );

        decode_ranked_results(response.body())
    }
}

#[async_trait]
impl SauceProvider for SaucenaoSauceProvider {
    async fn find_sauce_report(&self, image_path: &Path) -> Result<SauceReport, SauceError> {
        self.find_sauce(image_path).await.map(SauceReport::Ranked)
    }
}

pub fn decode_ranked_results(body: &[u8]) -> Result<RankedResultSet, SauceError> {
    let response: SaucenaoResponse =
        serde_json::from_slice(body).map_err(|error| SauceError::Decode {
            backend: SauceBackend::Saucenao,
            message: error.to_string(),
        })?;

    let matches = response
        .results
        .unwrap_or_default()
        .into_iter()
        .map(SimilarityMatch::from)
        .collect();

    RankedResultSet::rank(matches).ok_or_else(|| SauceError::NoResults {
        backend: SauceBackend::Saucenao,
        message: "the response contained no matches".to_string(),
    })
}
