use crate::global_constants::MAX_SCRAPED_LINKS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapedSauce {
    search_term: String,
    links: Vec<String>,
}

impl ScrapedSauce {
    pub fn new(search_term: String, links: Vec<String>) -> Self {
        let mut links = links;
        links.truncate(MAX_SCRAPED_LINKS);
        Self { search_term, links }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }
}
