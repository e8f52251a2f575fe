mod http_request;
mod ranked_result_set;
mod sauce_backend;
mod sauce_report;
mod sauce_settings;
mod scraped_sauce;

pub use http_request::{FileUpload, HttpMethod, HttpResponse, RequestSpec};
pub use ranked_result_set::{RankedResultSet, SimilarityMatch};
pub use sauce_backend::SauceBackend;
pub use sauce_report::SauceReport;
pub use sauce_settings::{SauceSettings, ScrapeMarkers};
pub use scraped_sauce::ScrapedSauce;
