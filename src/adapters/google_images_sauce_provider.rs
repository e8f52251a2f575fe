use async_trait::async_trait;
use reqwest::Url;
use std::path::Path;
use std::sync::Arc;

use crate::core::errors::SauceError;
use crate::core::interfaces::adapters::{HttpTransport, SauceProvider};
use crate::core::models::{
    RequestSpec, SauceBackend, SauceReport, SauceSettings, ScrapeMarkers, ScrapedSauce,
};
use crate::core::pattern_extractor::extract_between;
use crate::global_constants;

pub struct GoogleImagesSauceProvider {
    http_transport: Arc<dyn HttpTransport>,
    search_url: String,
    markers: ScrapeMarkers,
}

impl GoogleImagesSauceProvider {
    pub fn new(
        http_transport: Arc<dyn HttpTransport>,
        search_url: String,
        markers: ScrapeMarkers,
    ) -> Self {
        Self {
            http_transport,
            search_url,
            markers,
        }
    }

    pub fn from_settings(http_transport: Arc<dyn HttpTransport>, settings: &SauceSettings) -> Self {
        Self::new(
            http_transport,
            settings.google_search_url.clone(),
            settings.scrape_markers(),
        )
    }

    pub async fn find_sauce(&self, image_path: &Path) -> Result<ScrapedSauce, SauceError> {
        let search_url = self.upload_image(image_path).await?;

        log::debug!(
            "{} Fetching results page",
            global_constants::LOG_TAG_GOOGLE_IMAGES
        );
        let results_page = self
            .http_transport
            .issue_request(&RequestSpec::get(search_url))
            .await?;

        scrape_results_page(&results_page.text(), &self.markers)
    }

    async fn upload_image(&self, image_path: &Path) -> Result<String, SauceError> {
        log::debug!(
            "{} Uploading {:?}",
            global_constants::LOG_TAG_GOOGLE_IMAGES,
            image_path
        );

        // The upload answers with a redirect to the results; the Location header is the payload.
        let upload = RequestSpec::post(self.search_url.as_str())
            .with_file_upload(image_path, global_constants::GOOGLE_UPLOAD_FIELD_NAME)
            .without_redirects();

        let response = self
            .http_transport
            .issue_request(&upload)
            .await
            .map_err(|source| SauceError::upload(SauceBackend::GoogleImages, source))?;

        let location = response
            .location()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .ok_or_else(|| SauceError::NoResults {
                backend: SauceBackend::GoogleImages,
                message: "could not obtain search URL".to_string(),
            })?;

        let search_url = Url::parse(&self.search_url)
            .and_then(|base| base.join(location))
            .map_err(|error| SauceError::request(location, error))?;

        Ok(append_locale(search_url.as_str()))
    }
}

#[async_trait]
impl SauceProvider for GoogleImagesSauceProvider {
    async fn find_sauce_report(&self, image_path: &Path) -> Result<SauceReport, SauceError> {
        self.find_sauce(image_path).await.map(SauceReport::Scraped)
    }
}

fn append_locale(search_url: &str) -> String {
    let separator = if search_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}",
        search_url,
        separator,
        global_constants::LOCALE_PARAMETER
    )
}

pub fn scrape_results_page(html: &str, markers: &ScrapeMarkers) -> Result<ScrapedSauce, SauceError> {
    let search_term = extract_between(
        html,
        &markers.search_term_prefix,
        &markers.search_term_suffix,
        global_constants::MAX_SCRAPED_LINKS,
    )
    .into_iter()
    .next()
    .ok_or_else(|| SauceError::NoSauce {
        message: "failed to find what this image is about".to_string(),
    })?;

    let matching_section_start = html
        .rfind(global_constants::MATCHING_IMAGES_MARKER)
        .ok_or_else(|| SauceError::NoSauce {
            message: "no pages include matching images".to_string(),
        })?;

    let links = extract_between(
        &html[matching_section_start..],
        &markers.result_link_prefix,
        &markers.result_link_suffix,
        global_constants::MAX_SCRAPED_LINKS,
    )
    .iter()
    .map(|link| html_escape::decode_html_entities(link).into_owned())
    .collect();

    Ok(ScrapedSauce::new(search_term, links))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::test_support::{body_response, redirect_response, ScriptedHttpTransport};
    use crate::core::models::HttpMethod;

    fn create_markers() -> ScrapeMarkers {
        ScrapeMarkers {
            search_term_prefix: "<a class=\"term\">".to_string(),
            search_term_suffix: "</a>".to_string(),
            result_link_prefix: "<div class=\"r\"><a href=\"".to_string(),
            result_link_suffix: "\"".to_string(),
        }
    }

    fn create_results_page(links: &[&str]) -> String {
        let mut page = String::from(
            "<html><div>Possible related search: <a class=\"term\">ferris the crab</a></div>\n\
             <div class=\"r\"><a href=\"https://ignored.example/before\"></div>\n\
             <h3>Pages that include matching images</h3>\n",
        );
        for link in links {
            page.push_str(&format!("<div class=\"r\"><a href=\"{link}\">page</a></div>\n"));
        }
        page.push_str("</html>");
        page
    }

    fn create_provider(transport: Arc<ScriptedHttpTransport>) -> GoogleImagesSauceProvider {
        GoogleImagesSauceProvider::new(
            transport,
            "https://images.example/searchbyimage/upload".to_string(),
            create_markers(),
        )
    }

    #[test]
    fn test_append_locale_uses_ampersand_for_existing_query() {
        assert_eq!(
            append_locale("https://images.example/search?tbs=sbi:abc"),
            "https://images.example/search?tbs=sbi:abc&hl=en"
        );
    }

    #[test]
    fn test_append_locale_starts_query_when_missing() {
        assert_eq!(
            append_locale("https://images.example/search"),
            "https://images.example/search?hl=en"
        );
    }

    #[test]
    fn test_scrape_results_page_extracts_term_and_unescaped_links() {
        let page = create_results_page(&[
            "https://a.example/?x=1&amp;y=2",
            "https://b.example/",
        ]);

        let sauce = scrape_results_page(&page, &create_markers()).unwrap();

        assert_eq!(sauce.search_term(), "ferris the crab");
        assert_eq!(
            sauce.links(),
            [
                "https://a.example/?x=1&y=2".to_string(),
                "https://b.example/".to_string()
            ]
        );
    }

    #[test]
    fn test_scrape_results_page_caps_links() {
        let links: Vec<String> = (1..=6).map(|i| format!("https://{i}.example/")).collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let page = create_results_page(&link_refs);

        let sauce = scrape_results_page(&page, &create_markers()).unwrap();

        assert_eq!(sauce.links().len(), global_constants::MAX_SCRAPED_LINKS);
        assert_eq!(sauce.links()[0], "https://1.example/");
    }

    #[test]
    fn test_scrape_results_page_without_matching_section_is_no_sauce() {
        let page = "<a class=\"term\">ferris the crab</a> nothing else";

        let error = scrape_results_page(page, &create_markers()).unwrap_err();

        assert!(matches!(error, SauceError::NoSauce { .. }));
    }

    #[test]
    fn test_scrape_results_page_without_search_term_is_no_sauce() {
        let page = "Pages that include matching images <div class=\"r\"><a href=\"x\">";

        let error = scrape_results_page(page, &create_markers()).unwrap_err();

        assert!(matches!(error, SauceError::NoSauce { .. }));
    }

    #[test]
    fn test_scrape_results_page_reads_links_after_last_marker() {
        let page = "<a class=\"term\">ferris the crab</a>\n\
                    <h3>Pages that include matching images</h3>\n\
                    <div class=\"r\"><a href=\"https://first.example/\">first</a></div>\n\
                    <h3>Pages that include matching images</h3>\n\
                    <div class=\"r\"><a href=\"https://second.example/\">second</a></div>";

        let sauce = scrape_results_page(page, &create_markers()).unwrap();

        assert_eq!(sauce.links(), ["https://second.example/".to_string()]);
    }

    #[test]
    fn test_scrape_results_page_with_no_links_is_empty_success() {
        let page = create_results_page(&[]);

        let sauce = scrape_results_page(&page, &create_markers()).unwrap();

        assert!(sauce.links().is_empty());
    }

    #[tokio::test]
    async fn test_find_sauce_uploads_without_redirects_then_fetches_localized_page() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![
            Ok(redirect_response(Some("https://images.example/search?tbs=sbi:abc"))),
            Ok(body_response(&create_results_page(&["https://a.example/"]))),
        ]));
        let provider = create_provider(Arc::clone(&transport));

        let sauce = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap();

        assert_eq!(sauce.search_term(), "ferris the crab");
        let requests = transport.recorded_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert!(!requests[0].follow_redirects);
        assert_eq!(
            requests[0].upload.as_ref().unwrap().field_name,
            global_constants::GOOGLE_UPLOAD_FIELD_NAME
        );
        assert_eq!(requests[1].method, HttpMethod::Get);
        assert!(requests[1].follow_redirects);
        assert_eq!(
            requests[1].url,
            "https://images.example/search?tbs=sbi:abc&hl=en"
        );
    }

    #[tokio::test]
    async fn test_find_sauce_resolves_relative_location_against_upload_url() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![
            Ok(redirect_response(Some("/search?tbs=sbi:abc"))),
            Ok(body_response(&create_results_page(&["https://a.example/"]))),
        ]));
        let provider = create_provider(Arc::clone(&transport));

        provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap();

        assert_eq!(
            transport.recorded_requests()[1].url,
            "https://images.example/search?tbs=sbi:abc&hl=en"
        );
    }

    #[tokio::test]
    async fn test_find_sauce_without_location_is_no_results() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![Ok(redirect_response(None))]));
        let provider = create_provider(Arc::clone(&transport));

        let error = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap_err();

        assert!(matches!(
            error,
            SauceError::NoResults {
                backend: SauceBackend::GoogleImages,
                ..
            }
        ));
        assert_eq!(transport.recorded_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_find_sauce_with_empty_location_is_no_results() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![Ok(redirect_response(Some(
            "  ",
        )))]));
        let provider = create_provider(transport);

        let error = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap_err();

        assert!(matches!(error, SauceError::NoResults { .. }));
    }

    #[tokio::test]
    async fn test_find_sauce_page_without_matching_section_is_no_sauce() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![
            Ok(redirect_response(Some("https://images.example/search?tbs=sbi:abc"))),
            Ok(body_response("<a class=\"term\">ferris the crab</a>")),
        ]));
        let provider = create_provider(transport);

        let error = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap_err();

        assert!(matches!(error, SauceError::NoSauce { .. }));
    }

    #[tokio::test]
    async fn test_find_sauce_upload_failure_is_upload_error() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![Err(SauceError::network(
            "https://images.example/searchbyimage/upload",
            "connection reset",
        ))]));
        let provider = create_provider(transport);

        let error = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap_err();

        match error {
            SauceError::Upload { backend, source } => {
                assert_eq!(backend, SauceBackend::GoogleImages);
                assert!(matches!(*source, SauceError::Network { .. }));
            }
            other => panic!("Expected upload error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_sauce_body_read_failure_is_read_error() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![
            Ok(redirect_response(Some("https://images.example/search?tbs=sbi:abc"))),
            Err(SauceError::read(
                "https://images.example/search",
                "connection closed",
            )),
        ]));
        let provider = create_provider(transport);

        let error = provider.find_sauce(Path::new("/tmp/cat.png")).await.unwrap_err();

        assert!(matches!(error, SauceError::Read { .. }));
    }

    #[tokio::test]
    async fn test_find_sauce_report_wraps_scraped_sauce() {
        let transport = Arc::new(ScriptedHttpTransport::new(vec![
            Ok(redirect_response(Some("https://images.example/search?q=1"))),
            Ok(body_response(&create_results_page(&["https://a.example/"]))),
        ]));
        let provider = create_provider(transport);

        let report = provider
            .find_sauce_report(Path::new("/tmp/cat.png"))
            .await
            .unwrap();

        assert!(matches!(report, SauceReport::Scraped(_)));
    }
}
