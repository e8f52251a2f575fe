mod http_transport;
mod sauce_provider;

pub use http_transport::HttpTransport;
pub use sauce_provider::SauceProvider;
