use crate::models::{Heading, PageStructure};
use once_cell::sync::Lazy;
use regex::Regex;
use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink, Selector};

static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector should be valid")
});
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector should be valid"));

// html5ever always synthesizes a <body>, so the source is checked for a closed one
static BODY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<body[\s>/].*?</body\s*>").expect("body tag regex should be valid")
});

/// Elements whose content never counts as visible text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

pub struct HtmlParser;

impl HtmlParser {
    /// Extracts the heading outline and the visible character count of a page.
    ///
    /// The character count is the number of non-whitespace glyphs in the body
    /// text (or the whole document when the source has no closed `<body>`), with
    /// `<script>` and `<style>` content removed. Parsing never fails: garbage
    /// input yields whatever text html5ever recovers, and empty input yields
    /// `PageStructure::default()`.
    pub fn parse(html: &str) -> PageStructure {
        if html.trim().is_empty() {
            return PageStructure::default();
        }

        let document = Self::parse_without_scripting(html);

        PageStructure {
            word_count: Self::count_visible_chars(&document, BODY_TAG.is_match(html)),
            headings: Self::extract_headings(&document),
        }
    }

    /// Parses as a browser with scripting off would, so `<noscript>` content
    /// becomes elements instead of one raw text node.
    fn parse_without_scripting(html: &str) -> Html {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };

        html5ever::driver::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
    }

    fn extract_headings(document: &Html) -> Vec<Heading> {
        document
            .select(&HEADING_SELECTOR)
            .filter_map(|el| {
                let text = el.text().collect::<String>();
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(Heading::new(el.value().name(), text))
                }
            })
            .collect()
    }

    fn count_visible_chars(document: &Html, has_body: bool) -> usize {
        let root: ElementRef = if has_body {
            document
                .select(&BODY_SELECTOR)
                .next()
                .unwrap_or_else(|| document.root_element())
        } else {
            document.root_element()
        };

        root.descendants()
            .filter_map(|node| node.value().as_text().map(|text| (node, text)))
            .filter(|(node, _)| {
                !node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
                })
            })
            .map(|(_, text)| text.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }
}
