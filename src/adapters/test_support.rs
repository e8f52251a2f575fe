use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::core::errors::SauceError;
use crate::core::interfaces::adapters::HttpTransport;
use crate::core::models::{HttpResponse, RequestSpec};

pub struct ScriptedHttpTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, SauceError>>>,
    recorded_requests: Arc<Mutex<Vec<RequestSpec>>>,
}

impl ScriptedHttpTransport {
    pub fn new(responses: Vec<Result<HttpResponse, SauceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            recorded_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn recorded_requests(&self) -> Vec<RequestSpec> {
        self.recorded_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedHttpTransport {
    async fn issue_request(&self, spec: &RequestSpec) -> Result<HttpResponse, SauceError> {
        self.recorded_requests.lock().unwrap().push(spec.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", spec.url))
    }
}

pub fn redirect_response(location: Option<&str>) -> HttpResponse {
    let mut headers = HashMap::new();
    if let Some(location) = location {
        headers.insert("Location".to_string(), location.to_string());
    }
    HttpResponse::new(302, headers, Vec::new())
}

pub fn body_response(body: &str) -> HttpResponse {
    HttpResponse::new(200, HashMap::new(), body.as_bytes().to_vec())
}
