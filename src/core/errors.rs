use std::path::PathBuf;
use thiserror::Error;

use super::models::SauceBackend;

#[derive(Debug, Error)]
pub enum SauceError {
    #[error("failed to read image file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create HTTP request for {url}: {message}")]
    Request { url: String, message: String },
    #[error("failed to retrieve HTTP response from {url}: {message}")]
    Network { url: String, message: String },
    #[error("failed to upload image to {backend}: {source}")]
    Upload {
        backend: SauceBackend,
        #[source]
        source: Box<SauceError>,
    },
    #[error("failed to read response data from {url}: {message}")]
    Read { url: String, message: String },
    #[error("failed to process {backend} response: {message}")]
    Decode {
        backend: SauceBackend,
        message: String,
    },
    #[error("{backend} returned no results: {message}")]
    NoResults {
        backend: SauceBackend,
        message: String,
    },
    #[error("couldn't find sauce: {message}")]
    NoSauce { message: String },
}

impl SauceError {
    pub fn upload(backend: SauceBackend, source: SauceError) -> Self {
        SauceError::Upload {
            backend,
            source: Box::new(source),
        }
    }

    pub fn request(url: &str, message: impl ToString) -> Self {
        SauceError::Request {
            url: without_query(url),
            message: message.to_string(),
        }
    }

    pub fn network(url: &str, message: impl ToString) -> Self {
        SauceError::Network {
            url: without_query(url),
            message: message.to_string(),
        }
    }

    pub fn read(url: &str, message: impl ToString) -> Self {
        SauceError::Read {
            url: without_query(url),
            message: message.to_string(),
        }
    }
}

/// Drops the query string so tokens carried in URLs never reach error text or logs.
pub fn without_query(url: &str) -> String {
    match url.split_once('?') {
        Some((base, _)) => base.to_string(),
        None => url.to_string(),
    }
}
