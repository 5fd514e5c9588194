use crate::models::SeoScore;
use crate::scorer::{SeoScorer, count_glyphs, strip_tags};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static META_COMMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--\s*meta:\s*(.*?)\s*-->").expect("meta comment regex should be valid")
});
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^```html?\n?").expect("fence open regex should be valid"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n?```$").expect("fence close regex should be valid"));
static H1_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<h1[^>]*>(.*?)</h1>").expect("h1 regex should be valid"));

/// A generated article after cleanup, with its score attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub meta_description: String,
    pub content: String,
    pub word_count: usize,
    pub seo_score: SeoScore,
}

impl Article {
    /// Cleans up raw model output and scores it.
    ///
    /// A leading `<!-- meta: ... -->` comment becomes the meta description and a
    /// wrapping Markdown code fence is dropped. The title is the first `<h1>`,
    /// then `fallback_title`, then the keyword itself.
    pub fn from_generated_html(
        keyword: &str,
        raw: &str,
        fallback_title: Option<&str>,
        cooccurrence: &[String],
        target_word_count: usize,
    ) -> Self {
        let (meta_description, content) = match META_COMMENT.captures(raw) {
            Some(caps) => {
                let meta = caps.get(1).map(|m| m.as_str()).unwrap_or_default().to_string();
                let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
                let mut rest = String::with_capacity(raw.len());
                rest.push_str(&raw[..whole.start]);
                rest.push_str(&raw[whole.end..]);
                (meta, rest.trim().to_string())
            }
            None => (String::new(), raw.to_string()),
        };

        let content = FENCE_OPEN.replace(&content, "");
        let content = FENCE_CLOSE.replace(&content, "").into_owned();

        let title = H1_ELEMENT
            .captures(&content)
            .and_then(|caps| caps.get(1))
            .map(|m| strip_tags(m.as_str()))
            .or_else(|| fallback_title.map(str::to_string))
            .unwrap_or_else(|| keyword.to_string());

        let word_count = count_glyphs(&strip_tags(&content));
        let seo_score = SeoScorer::score(keyword, &content, cooccurrence, target_word_count);

        Self {
            title,
            meta_description,
            content,
            word_count,
            seo_score,
        }
    }
}
