use super::ranked_result_set::RankedResultSet;
use super::scraped_sauce::ScrapedSauce;

#[derive(Clone, Debug, PartialEq)]
pub enum SauceReport {
    Scraped(ScrapedSauce),
    Ranked(RankedResultSet),
}
