use regex::Regex;

/// Finds the text between `left` and the next `right`, up to `max_matches`
/// times, in order of appearance. Markers are literal text and are stripped
/// from the results. Like the scraped pages it is used on, a match never
/// spans a line break.
pub fn extract_between(source: &str, left: &str, right: &str, max_matches: usize) -> Vec<String> {
    if max_matches == 0 {
        return Vec::new();
    }

    let pattern = format!("{}(.*?){}", regex::escape(left), regex::escape(right));
    let Ok(matcher) = Regex::new(&pattern) else {
        return Vec::new();
    };

    matcher
        .captures_iter(source)
        .take(max_matches)
        .filter_map(|captures| captures.get(1))
        .map(|found| found.as_str().to_string())
        .collect()
}
