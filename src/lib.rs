//! Finds where an image comes from by uploading it to a reverse image search
//! backend and summarising what the backend reports.
//!
//! Two backends are supported: Google Images, whose HTML results page is
//! scraped, and the SauceNAO JSON API, whose matches are ranked by similarity.

pub mod adapters;
pub mod core;
pub mod global_constants;
pub mod presentation;

pub use crate::core::errors::SauceError;
pub use crate::core::models::{RankedResultSet, SauceBackend, SauceSettings, ScrapedSauce};
pub use crate::core::orchestrators::SauceOrchestrator;
