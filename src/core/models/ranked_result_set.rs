#[derive(Clone, Debug, PartialEq)]
pub struct SimilarityMatch {
    pub similarity: f64,
    pub title: String,
    pub source_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedResultSet {
    matches: Vec<SimilarityMatch>,
}

impl RankedResultSet {
    pub fn rank(mut matches: Vec<SimilarityMatch>) -> Option<Self> {
        if matches.is_empty() {
            return None;
        }
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        Some(Self { matches })
    }

    pub fn matches(&self) -> &[SimilarityMatch] {
        &self.matches
    }

    pub fn top_match(&self) -> Option<&SimilarityMatch> {
        self.matches.first()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
