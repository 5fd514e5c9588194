use crate::models::{ScoreDetails, SeoScore};
use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex should be valid"));
static H1_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h1\b").expect("h1 regex should be valid"));
static H2_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h2\b").expect("h2 regex should be valid"));
static H3_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h3\b").expect("h3 regex should be valid"));

/// Only the strongest terms are checked for coverage.
const COVERAGE_TERMS: usize = 15;

const DENSITY_WEIGHT: f64 = 0.25;
const COVERAGE_WEIGHT: f64 = 0.30;
const HEADING_WEIGHT: f64 = 0.25;
const WORD_COUNT_WEIGHT: f64 = 0.20;

/// Removes every `<...>` tag, leaving text and whitespace in place.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Number of non-whitespace characters.
pub fn count_glyphs(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

pub struct SeoScorer;

impl SeoScorer {
    pub fn score(
        keyword: &str,
        html_content: &str,
        cooccurrence: &[String],
        target_word_count: usize,
    ) -> SeoScore {
        let text_content = strip_tags(html_content);
        let actual_word_count = count_glyphs(&text_content);

        let keyword_count = Self::count_keyword(keyword, &text_content);
        let keyword_density =
            Self::density_score(keyword, keyword_count, actual_word_count).round() as u32;

        let top_terms = &cooccurrence[..cooccurrence.len().min(COVERAGE_TERMS)];
        let (covered, missing): (Vec<String>, Vec<String>) = top_terms
            .iter()
            .cloned()
            .partition(|term| text_content.contains(term.as_str()));
        let cooccurrence_coverage = if top_terms.is_empty() {
            100
        } else {
            (covered.len() as f64 / top_terms.len() as f64 * 100.0).round() as u32
        };

        let heading_structure = Self::heading_score(html_content);
        let word_count_score = Self::word_count_score(actual_word_count, target_word_count);

        SeoScore {
            overall: Self::overall(
                keyword_density,
                cooccurrence_coverage,
                heading_structure,
                word_count_score,
            ),
            keyword_density,
            cooccurrence_coverage,
            heading_structure,
            word_count_score,
            details: ScoreDetails {
                target_word_count,
                actual_word_count,
                keyword_count,
                covered_cooccurrences: covered,
                missing_cooccurrences: missing,
            },
        }
    }

    /// Weighted sum of the four sub-scores, rounded.
    ///
    /// Takes the already-rounded sub-scores, so the result can differ by one
    /// point from a sum over the unrounded density.
    pub fn overall(density: u32, coverage: u32, heading: u32, word_count: u32) -> u32 {
        (f64::from(density) * DENSITY_WEIGHT
            + f64::from(coverage) * COVERAGE_WEIGHT
            + f64::from(heading) * HEADING_WEIGHT
            + f64::from(word_count) * WORD_COUNT_WEIGHT)
            .round() as u32
    }

    /// Case-insensitive occurrences of `keyword`; whitespace between its tokens
    /// matches any amount of whitespace, including none.
    pub fn count_keyword(keyword: &str, text: &str) -> usize {
        let tokens: Vec<String> = keyword.split_whitespace().map(regex::escape).collect();
        if tokens.is_empty() {
            return 0;
        }

        match Regex::new(&format!("(?i){}", tokens.join(r"\s*"))) {
            Ok(re) => re.find_iter(text).count(),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "Keyword pattern rejected");
                0
            }
        }
    }

    /// Maps keyword density (percent of character mass) to 0–100: under 1% scales
    /// by 50, 1–4% is full marks, above 4% loses 20 points per percent.
    pub fn density_score(keyword: &str, keyword_count: usize, actual_word_count: usize) -> f64 {
        if actual_word_count == 0 {
            return 0.0;
        }

        let keyword_len = keyword.chars().count();
        let density = (keyword_count * keyword_len) as f64 / actual_word_count as f64 * 100.0;

        let score = if density < 1.0 {
            density * 50.0
        } else if density > 4.0 {
            (100.0 - (density - 4.0) * 20.0).max(0.0)
        } else {
            100.0
        };
        score.min(100.0)
    }

    pub fn heading_score(html_content: &str) -> u32 {
        let h2_count = H2_OPEN.find_iter(html_content).count();
        let h3_count = H3_OPEN.find_iter(html_content).count();

        let mut score = 0;
        if H1_OPEN.is_match(html_content) {
            score += 30;
        }
        if (4..=8).contains(&h2_count) {
            score += 40;
        } else if h2_count >= 2 {
            score += 25;
        }
        if h3_count >= 3 {
            score += 30;
        } else if h3_count >= 1 {
            score += 15;
        }
        score
    }

    /// Long articles are tolerated up to 130% of target, short ones only down to 80%.
    pub fn word_count_score(actual_word_count: usize, target_word_count: usize) -> u32 {
        let ratio = actual_word_count as f64 / target_word_count as f64;
        if (0.8..=1.3).contains(&ratio) {
            100
        } else if ratio >= 0.6 {
            70
        } else if ratio >= 0.4 {
            40
        } else {
            20
        }
    }
}
