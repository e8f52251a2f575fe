mod google_images_sauce_provider;
mod remote_image_stash;
mod reqwest_http_transport;
mod saucenao_sauce_provider;
#[cfg(test)]
pub(crate) mod test_support;

pub use google_images_sauce_provider::{scrape_results_page, GoogleImagesSauceProvider};
pub use remote_image_stash::{RemoteImageStash, StashedImage};
pub use reqwest_http_transport::ReqwestHttpTransport;
pub use saucenao_sauce_provider::{decode_ranked_results, SaucenaoSauceProvider};
