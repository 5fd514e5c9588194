use crate::models::{CompetitorResult, CooccurrenceTerm};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Runs of 2–8 kanji, hiragana, katakana or ASCII/full-width letters.
pub const DEFAULT_TERM_PATTERN: &str = r"[一-龥ぁ-んァ-ヴa-zA-Zａ-ｚＡ-Ｚ]{2,8}";

pub const DEFAULT_MAX_TERMS: usize = 30;

/// Japanese function words and generic SEO filler that never count as topical terms.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "の",
    "は",
    "が",
    "を",
    "に",
    "で",
    "と",
    "も",
    "や",
    "する",
    "ある",
    "いる",
    "こと",
    "もの",
    "ため",
    "よう",
    "など",
    "から",
    "まで",
    "について",
    "とは",
    "できる",
    "なる",
    "れる",
    "られる",
    "おすすめ",
    "方法",
    "解説",
    "紹介",
    "まとめ",
    "ランキング",
    "比較",
    "選び方",
    "ポイント",
    "注意点",
    "メリット",
    "デメリット",
    "徹底",
    "完全",
    "ガイド",
    "保存版",
    "最新",
];

static DEFAULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_TERM_PATTERN).expect("default term pattern should be valid"));

/// Builds a frequency table of topical terms from competitor headings.
#[derive(Debug, Clone)]
pub struct CooccurrenceExtractor {
    stop_words: HashSet<String>,
    term_pattern: Regex,
    max_terms: usize,
}

impl Default for CooccurrenceExtractor {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            term_pattern: DEFAULT_PATTERN.clone(),
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

impl CooccurrenceExtractor {
    /// An extractor for another language: its own stop words and term pattern.
    pub fn new<I, S>(stop_words: I, term_pattern: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let term_pattern = Regex::new(term_pattern)
            .with_context(|| format!("Invalid term pattern: {}", term_pattern))?;

        Ok(Self {
            stop_words: stop_words.into_iter().map(Into::into).collect(),
            term_pattern,
            max_terms: DEFAULT_MAX_TERMS,
        })
    }

    pub fn with_stop_words<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn with_term_pattern(mut self, term_pattern: &str) -> Result<Self> {
        self.term_pattern = Regex::new(term_pattern)
            .with_context(|| format!("Invalid term pattern: {}", term_pattern))?;
        Ok(self)
    }

    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Counts every pattern match in the competitors' heading text, skipping the
    /// keyword's own tokens and the stop words.
    ///
    /// Sorted by descending count; ties keep first-seen order.
    pub fn extract(&self, competitors: &[CompetitorResult], keyword: &str) -> Vec<CooccurrenceTerm> {
        let all_text = competitors
            .iter()
            .flat_map(|c| c.headings.iter().map(|h| h.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ");

        let keyword_tokens: HashSet<String> =
            keyword.split_whitespace().map(str::to_lowercase).collect();

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for m in self.term_pattern.find_iter(&all_text) {
            let word = m.as_str();
            if self.is_excluded(word, &keyword_tokens) {
                continue;
            }

            match counts.get_mut(word) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(word.to_string(), 1);
                    order.push(word.to_string());
                }
            }
        }

        let mut terms: Vec<CooccurrenceTerm> = order
            .into_iter()
            .map(|word| {
                let score = counts.get(&word).copied().unwrap_or_default();
                CooccurrenceTerm { word, score }
            })
            .collect();

        // stable: equal scores stay in first-seen order
        terms.sort_by(|a, b| b.score.cmp(&a.score));
        terms.truncate(self.max_terms);
        terms
    }

    fn is_excluded(&self, word: &str, keyword_tokens: &HashSet<String>) -> bool {
        let lower = word.to_lowercase();
        keyword_tokens.contains(&lower)
            || self.stop_words.contains(word)
            || self.stop_words.contains(&lower)
    }
}
