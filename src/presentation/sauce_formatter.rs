use crate::core::models::{RankedResultSet, SauceReport, ScrapedSauce};
use crate::global_constants;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportMarkup {
    #[default]
    Html,
    Plain,
}

impl ReportMarkup {
    fn emphasize(self, text: &str) -> String {
        match self {
            ReportMarkup::Html => format!("<b>{}</b>", text),
            ReportMarkup::Plain => text.to_string(),
        }
    }
}

pub fn format_sauce_report(report: &SauceReport, markup: ReportMarkup) -> String {
    match report {
        SauceReport::Scraped(sauce) => format_scraped_sauce(sauce, markup),
        SauceReport::Ranked(results) => format_ranked_results(results, markup),
    }
}

pub fn format_scraped_sauce(sauce: &ScrapedSauce, markup: ReportMarkup) -> String {
    let links: Vec<&str> = sauce
        .links()
        .iter()
        .map(String::as_str)
        .filter(|link| !link.is_empty())
        .collect();

    format!(
        "{} {}\n\n{}",
        global_constants::GOOGLE_IMAGES_HEADLINE,
        markup.emphasize(sauce.search_term()),
        links.join("\n")
    )
}

pub fn format_ranked_results(results: &RankedResultSet, markup: ReportMarkup) -> String {
    let low_similarity = results
        .top_match()
        .is_some_and(|top| top.similarity < global_constants::LOW_SIMILARITY_THRESHOLD);
    let warning = if low_similarity {
        markup.emphasize(global_constants::LOW_SIMILARITY_WARNING)
    } else {
        String::new()
    };

    let titles: Vec<&str> = results
        .matches()
        .iter()
        .map(|similarity_match| similarity_match.title.as_str())
        .filter(|title| !title.is_empty())
        .collect();
    let titles = format!(
        "{}\n{}",
        markup.emphasize(global_constants::TITLES_HEADING),
        titles.join(", ")
    );

    let mut sources = format!("{}\n", markup.emphasize(global_constants::SOURCES_HEADING));
    for similarity_match in results.matches() {
        sources.push_str(&similarity_match.source_urls.join("\n"));
        sources.push('\n');
    }

    format!("{}\n{}\n{}\n", warning, titles, sources)
}
