use kiji::html_parser::HtmlParser;
use kiji::models::{Heading, PageStructure};

#[test]
fn test_headings_strip_inline_markup() {
    let page = HtmlParser::parse("<h2>A <b>B</b></h2><h3>C</h3>");

    assert_eq!(
        page.headings,
        vec![Heading::new("h2", "A B"), Heading::new("h3", "C")]
    );
}

#[test]
fn test_headings_keep_document_order_across_levels() {
    let html = r#"
        <html><body>
            <h3>third level first</h3>
            <H1 class="title">Main <span><a href="/x">title</a></span></H1>
            <h6>deep</h6>
            <h2 id="s1">
                Section
            </h2>
        </body></html>
    "#;

    let page = HtmlParser::parse(html);
    let tags: Vec<_> = page.headings.iter().map(|h| h.tag.as_str()).collect();
    assert_eq!(tags, vec!["h3", "h1", "h6", "h2"]);
    assert_eq!(page.headings[1].text, "Main title");
    assert_eq!(page.headings[3].text, "Section");
}

#[test]
fn test_empty_headings_are_discarded() {
    let page = HtmlParser::parse(r#"<body><h2><img src="x.png"></h2><h3>   </h3><h4>kept</h4></body>"#);

    assert_eq!(page.headings, vec![Heading::new("h4", "kept")]);
}

#[test]
fn test_word_count_excludes_markup_and_whitespace() {
    let page = HtmlParser::parse("<body><p>ab cd</p></body>");
    assert_eq!(page.word_count, 4);
}

#[test]
fn test_word_count_removes_newlines_and_counts_characters() {
    let page = HtmlParser::parse("<body><p>日本語\n\tの\n文章</p>\n<p> SEO </p></body>");
    // 日本語 の 文章 SEO
    assert_eq!(page.word_count, 9);
}

#[test]
fn test_script_and_style_content_is_ignored() {
    let html = "<html><head><style>body { margin: 0 }</style></head>\
                <body><script>var a = 1;</script><p>xy</p><style>p{}</style></body></html>";

    assert_eq!(HtmlParser::parse(html).word_count, 2);
}

#[test]
fn test_only_body_counts_when_present() {
    let html = "<html><head><title>Ignored title</title></head><body><p>abc</p></body></html>";
    assert_eq!(HtmlParser::parse(html).word_count, 3);
}

#[test]
fn test_whole_document_counts_without_body() {
    let page = HtmlParser::parse("<title>ab</title><p>cd</p>");
    assert_eq!(page.word_count, 4);
}

#[test]
fn test_headings_are_counted_as_body_text() {
    let page = HtmlParser::parse("<body><h2>見出し</h2><p>本文</p></body>");
    assert_eq!(page.word_count, 5);
    assert_eq!(page.headings.len(), 1);
}

#[test]
fn test_empty_input_yields_default() {
    assert_eq!(HtmlParser::parse(""), PageStructure::default());
    assert_eq!(HtmlParser::parse("   \n "), PageStructure::default());
}

#[test]
fn test_garbage_input_degrades_gracefully() {
    let inputs = [
        "<<<>>>",
        "</h1></h2><h3",
        "<h2 <b>>unterminated",
        "\u{0}\u{1}<body",
        "<script>never closed",
    ];

    for input in inputs {
        let page = HtmlParser::parse(input);
        assert!(
            page.headings.iter().all(|h| !h.text.is_empty()),
            "Headings must never be empty for input {:?}",
            input
        );
    }

    assert!(HtmlParser::parse("</h1></h2><h3").headings.is_empty());
    assert_eq!(HtmlParser::parse("<script>never closed").word_count, 0);
}

#[test]
fn test_noscript_markup_is_not_counted_as_text() {
    let html = r#"<body><noscript><iframe src="https://www.googletagmanager.com/ns.html?id=GTM-XXXX" height="0" width="0"></iframe></noscript><p>abcd</p></body>"#;

    assert_eq!(HtmlParser::parse(html).word_count, 4);
}

#[test]
fn test_headings_inside_noscript_are_found() {
    let page = HtmlParser::parse("<body><noscript><h2>Enable JS</h2></noscript><h2>Real</h2></body>");

    assert_eq!(
        page.headings,
        vec![Heading::new("h2", "Enable JS"), Heading::new("h2", "Real")]
    );
    // EnableJS Real
    assert_eq!(page.word_count, 12);
}

#[test]
fn test_unclosed_body_counts_whole_document() {
    let page = HtmlParser::parse("<html><head><title>TT</title></head><body><p>ab</p>");
    assert_eq!(page.word_count, 4);
}
