use kiji::article::Article;
use kiji::scorer::SeoScorer;

#[test]
fn test_meta_comment_and_code_fence_are_removed() {
    let raw = "<!-- meta: SEO対策の基本を解説します -->\n```html\n<h1>SEO対策ガイド</h1>\n<p>本文</p>\n```";

    let article = Article::from_generated_html("SEO対策", raw, None, &[], 5000);

    assert_eq!(article.meta_description, "SEO対策の基本を解説します");
    assert_eq!(article.content, "<h1>SEO対策ガイド</h1>\n<p>本文</p>");
    assert_eq!(article.title, "SEO対策ガイド");
}

#[test]
fn test_title_strips_inline_markup() {
    let raw = r#"<h1 class="title">内部リンク<span>の設計</span></h1><p>x</p>"#;

    let article = Article::from_generated_html("内部リンク", raw, None, &[], 5000);

    assert_eq!(article.title, "内部リンクの設計");
    assert!(article.meta_description.is_empty());
}

#[test]
fn test_title_falls_back_to_given_title_then_keyword() {
    let raw = "<h2>見出しだけ</h2><p>本文</p>";

    let article = Article::from_generated_html("SEO", raw, Some("下書きタイトル"), &[], 5000);
    assert_eq!(article.title, "下書きタイトル");

    let article = Article::from_generated_html("SEO", raw, None, &[], 5000);
    assert_eq!(article.title, "SEO");
}

#[test]
fn test_word_count_ignores_markup() {
    let raw = "<h2>見出し</h2>\n<p>本文 です</p>";

    let article = Article::from_generated_html("SEO", raw, None, &[], 5000);

    // 見出し 本文 です
    assert_eq!(article.word_count, 7);
    assert_eq!(article.seo_score.details.actual_word_count, 7);
}

#[test]
fn test_score_is_computed_on_cleaned_content() {
    let content = "<h1>SEO</h1><h2>内部リンク</h2><p>被リンク</p>";
    let raw = format!("<!-- meta: 説明 -->\n```html\n{}\n```", content);
    let terms = vec!["内部リンク".to_string(), "構造化".to_string()];

    let article = Article::from_generated_html("SEO", &raw, None, &terms, 1000);

    assert_eq!(article.content, content);
    assert_eq!(
        article.seo_score,
        SeoScorer::score("SEO", content, &terms, 1000)
    );
    assert_eq!(article.seo_score.cooccurrence_coverage, 50);
}

#[test]
fn test_plain_html_is_kept_as_is() {
    let raw = "<h1>Title</h1><p>Body</p>";

    let article = Article::from_generated_html("keyword", raw, None, &[], 5000);

    assert_eq!(article.content, raw);
    assert_eq!(article.title, "Title");
}
