use kiji::cooccurrence::{CooccurrenceExtractor, DEFAULT_MAX_TERMS};
use kiji::fallback;
use kiji::models::{CompetitorResult, CooccurrenceTerm, Heading};

fn competitor(rank: usize, headings: &[&str]) -> CompetitorResult {
    CompetitorResult {
        rank,
        title: format!("Competitor {}", rank),
        url: format!("https://competitor{}.test/", rank),
        snippet: String::new(),
        word_count: 1000,
        headings: headings.iter().map(|text| Heading::new("h2", *text)).collect(),
    }
}

fn words(terms: &[CooccurrenceTerm]) -> Vec<&str> {
    terms.iter().map(|t| t.word.as_str()).collect()
}

#[test]
fn test_keyword_tokens_are_excluded() {
    let competitors = vec![
        competitor(1, &["SEO とは", "対策 まとめ"]),
        competitor(2, &["seo 内部リンク", "被リンク 対策"]),
    ];

    let terms = CooccurrenceExtractor::default().extract(&competitors, "SEO 対策");

    for term in &terms {
        assert!(
            !term.word.eq_ignore_ascii_case("seo") && term.word != "対策",
            "Keyword token leaked into terms: {}",
            term.word
        );
    }
    assert!(words(&terms).contains(&"内部リンク"));
}

#[test]
fn test_stop_words_are_excluded() {
    let competitors = vec![competitor(1, &["おすすめ 方法", "メリット デメリット", "被リンク"])];

    let terms = CooccurrenceExtractor::default().extract(&competitors, "SEO");

    assert_eq!(words(&terms), vec!["被リンク"]);
}

#[test]
fn test_terms_are_limited_to_script_runs_of_two_to_eight() {
    let competitors = vec![competitor(
        1,
        &["a", "！？", "123 456", "被リンク獲得の戦略と実践方法", "Google"],
    )];

    let terms = CooccurrenceExtractor::default().extract(&competitors, "SEO");

    for term in &terms {
        let len = term.word.chars().count();
        assert!((2..=8).contains(&len), "Term length out of range: {}", term.word);
        assert!(term.word.chars().all(|c| !c.is_ascii_digit() && !c.is_ascii_punctuation()));
    }
    // a 14-character run is split greedily into 8 + 6
    assert_eq!(
        words(&terms),
        vec!["被リンク獲得の戦", "略と実践方法", "Google"]
    );
}

#[test]
fn test_cap_and_descending_order() {
    // 40 distinct terms; term i appears 40 - i times
    let mut headings = Vec::new();
    for i in 0..40u8 {
        let term = format!("zz{}{}", (b'a' + i / 26) as char, (b'a' + i % 26) as char);
        for _ in 0..(40 - i) {
            headings.push(term.clone());
        }
    }
    let heading_refs: Vec<&str> = headings.iter().map(String::as_str).collect();
    let competitors = vec![competitor(1, &heading_refs)];

    let terms = CooccurrenceExtractor::default().extract(&competitors, "SEO");

    assert_eq!(terms.len(), DEFAULT_MAX_TERMS);
    assert!(terms.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(terms[0].word, "zzaa");
    assert_eq!(terms[0].score, 40);
    assert_eq!(terms[29].score, 11);
}

#[test]
fn test_ties_keep_first_seen_order() {
    let competitors = vec![
        competitor(1, &["被リンク 内部リンク", "構造化"]),
        competitor(2, &["構造化 内部リンク 被リンク"]),
    ];

    let terms = CooccurrenceExtractor::default().extract(&competitors, "SEO");

    assert_eq!(words(&terms), vec!["被リンク", "内部リンク", "構造化"]);
    assert!(terms.iter().all(|t| t.score == 2));
}

#[test]
fn test_body_text_is_ignored() {
    let mut c = competitor(1, &["見出し語"]);
    c.snippet = "本文の単語".to_string();
    c.title = "タイトル語".to_string();

    let terms = CooccurrenceExtractor::default().extract(&[c], "SEO");

    assert_eq!(words(&terms), vec!["見出し語"]);
}

#[test]
fn test_custom_language_configuration() {
    let extractor = CooccurrenceExtractor::new(["the", "and", "guide"], r"[A-Za-z]{3,12}")
        .unwrap()
        .with_max_terms(2);

    let competitors = vec![competitor(
        1,
        &["The crawl budget guide", "Crawl budget and sitemaps", "Sitemaps"],
    )];

    let terms = extractor.extract(&competitors, "crawl");

    assert_eq!(
        terms,
        vec![
            CooccurrenceTerm {
                word: "budget".to_string(),
                score: 2
            },
            CooccurrenceTerm {
                word: "sitemaps".to_string(),
                score: 1
            },
        ]
    );
}

#[test]
fn test_invalid_pattern_is_rejected() {
    assert!(CooccurrenceExtractor::new(Vec::<String>::new(), "([").is_err());
}

#[test]
fn test_offline_data_produces_terms() {
    let keyword = "SEO 対策";
    let terms = CooccurrenceExtractor::default().extract(&fallback::competitors(keyword), keyword);

    assert!(!terms.is_empty());
    assert!(terms.len() <= DEFAULT_MAX_TERMS);
    assert!(!words(&terms).contains(&"SEO"));
    assert!(!words(&terms).contains(&"対策"));
    assert!(!words(&terms).contains(&"まとめ"));
}
