mod sauce_formatter;

pub use sauce_formatter::{
    format_ranked_results, format_sauce_report, format_scraped_sauce, ReportMarkup,
};
