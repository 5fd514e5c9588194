use serde::{Deserialize, Serialize};

/// One entry returned by the ranking provider, in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub tag: String,
    pub text: String,
}

impl Heading {
    pub fn new(tag: &str, text: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            text: text.into(),
        }
    }
}

/// Structural signals extracted from a single HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub word_count: usize,
    pub headings: Vec<Heading>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorResult {
    pub rank: usize,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub word_count: usize,
    pub headings: Vec<Heading>,
}

impl CompetitorResult {
    pub fn from_search(rank: usize, result: SearchResult, page: PageStructure) -> Self {
        Self {
            rank,
            title: result.title,
            url: result.url,
            snippet: result.snippet,
            word_count: page.word_count,
            headings: page.headings,
        }
    }

    pub fn count_tag(&self, tag: &str) -> usize {
        self.headings.iter().filter(|h| h.tag == tag).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceTerm {
    pub word: String,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingFrequency {
    pub tag: String,
    pub text: String,
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub competitors: Vec<CompetitorResult>,
    pub cooccurrence: Vec<CooccurrenceTerm>,
    pub avg_word_count: usize,
    pub all_headings: Vec<HeadingFrequency>,
}

impl AnalysisResult {
    /// Target length for a new article: the competitor average plus 10%.
    pub fn recommended_word_count(&self) -> usize {
        (self.avg_word_count as f64 * 1.1).round() as usize
    }

    pub fn cooccurrence_words(&self) -> Vec<String> {
        self.cooccurrence.iter().map(|t| t.word.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoScore {
    pub overall: u32,
    pub keyword_density: u32,
    pub cooccurrence_coverage: u32,
    pub heading_structure: u32,
    pub word_count_score: u32,
    pub details: ScoreDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub target_word_count: usize,
    pub actual_word_count: usize,
    pub keyword_count: usize,
    pub covered_cooccurrences: Vec<String>,
    pub missing_cooccurrences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankCheck {
    pub keyword: String,
    pub target_url: String,
    /// `None` when the target is not within the checked results.
    pub position: Option<usize>,
    pub matched_url: String,
    pub matched_title: String,
    pub checked_at: String,
    pub top_results: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub keyword: String,
    pub recommended_word_count: usize,
    pub analysis: AnalysisResult,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub keyword: String,
    pub title: String,
    pub meta_description: String,
    pub word_count: usize,
    pub score: SeoScore,
    pub timestamp: String,
}
