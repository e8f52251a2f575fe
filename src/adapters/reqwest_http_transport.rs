use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, Client, Method, Response};
use std::collections::HashMap;
use std::time::Duration;

use crate::core::errors::{without_query, SauceError};
use crate::core::interfaces::adapters::HttpTransport;
use crate::core::models::{FileUpload, HttpMethod, HttpResponse, RequestSpec, SauceSettings};
use crate::global_constants;

pub struct ReqwestHttpTransport {
    following_client: Client,
    non_following_client: Client,
}

impl ReqwestHttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SauceError> {
        Ok(Self {
            following_client: Self::build_client(user_agent, timeout, redirect::Policy::default())?,
            non_following_client: Self::build_client(user_agent, timeout, redirect::Policy::none())?,
        })
    }

    pub fn from_settings(settings: &SauceSettings) -> Result<Self, SauceError> {
        Self::new(&settings.user_agent, settings.request_timeout())
    }

    fn build_client(
        user_agent: &str,
        timeout: Duration,
        policy: redirect::Policy,
    ) -> Result<Client, SauceError> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(policy)
            .build()
            .map_err(|error| SauceError::request("http client", error))
    }

    fn client_for(&self, spec: &RequestSpec) -> &Client {
        if spec.follow_redirects {
            &self.following_client
        } else {
            &self.non_following_client
        }
    }

    async fn build_multipart_form(upload: &FileUpload) -> Result<Form, SauceError> {
        let file_bytes = tokio::fs::read(&upload.file_path)
            .await
            .map_err(|source| SauceError::Io {
                path: upload.file_path.clone(),
                source,
            })?;

        let file_name = upload
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(global_constants::FALLBACK_UPLOAD_FILE_NAME)
            .to_string();

        log::debug!(
            "{} Attaching {} bytes as `{}` ({})",
            global_constants::LOG_TAG_HTTP,
            file_bytes.len(),
            upload.field_name,
            file_name
        );

        let file_part = Part::bytes(file_bytes).file_name(file_name);

        Ok(Form::new()
            .part(upload.field_name.clone(), file_part)
            .text(global_constants::AUXILIARY_FIELD_NAME, ""))
    }

    async fn read_limited_body(
        mut response: Response,
        url: &str,
        max_body_bytes: usize,
    ) -> Result<Vec<u8>, SauceError> {
        let too_large = || SauceError::read(url, format!("body exceeds {} bytes", max_body_bytes));

        if response
            .content_length()
            .is_some_and(|length| length > max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|error| SauceError::read(url, error.without_url()))?
        {
            if body.len() + chunk.len() > max_body_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl HttpTransport for ReqwestHttpTransport {
    async fn issue_request(&self, spec: &RequestSpec) -> Result<HttpResponse, SauceError> {
        let client = self.client_for(spec);
        let method = match spec.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        log::debug!(
            "{} {} {} (follow_redirects={})",
            global_constants::LOG_TAG_HTTP,
            method,
            without_query(&spec.url),
            spec.follow_redirects
        );

        let mut builder = client.request(method, &spec.url);
        if let Some(upload) = &spec.upload {
            builder = builder.multipart(Self::build_multipart_form(upload).await?);
        }

        let request = builder
            .build()
            .map_err(|error| SauceError::request(&spec.url, error.without_url()))?;

        let response = client
            .execute(request)
            .await
            .map_err(|error| SauceError::network(&spec.url, error.without_url()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = match spec.max_body_bytes {
            Some(max_body_bytes) => Self::read_limited_body(response, &spec.url, max_body_bytes).await?,
            None => response
                .bytes()
                .await
                .map_err(|error| SauceError::read(&spec.url, error.without_url()))?
                .to_vec(),
        };

        log::debug!(
            "{} HTTP {} with {} body bytes",
            global_constants::LOG_TAG_HTTP,
            status,
            body.len()
        );

        Ok(HttpResponse::new(status, headers, body))
    }
}
