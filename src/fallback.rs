//! Deterministic offline data used when no ranking provider is reachable.
//!
//! Both data sets are pure functions of the keyword so the pipeline stays
//! reproducible and demoable without live credentials.

use crate::models::{CompetitorResult, Heading, SearchResult};

/// Every synthetic result URL starts with this prefix.
pub const FALLBACK_URL_PREFIX: &str = "https://example.com";

/// Whether a result list came from [`search_results`] rather than a live provider.
pub fn is_fallback(results: &[SearchResult]) -> bool {
    results
        .iter()
        .any(|r| r.url.starts_with(FALLBACK_URL_PREFIX))
}

fn result(n: usize, title: String, snippet: String) -> SearchResult {
    SearchResult {
        title,
        url: format!("{FALLBACK_URL_PREFIX}/{n}"),
        snippet,
    }
}

pub fn search_results(keyword: &str) -> Vec<SearchResult> {
    vec![
        result(
            1,
            format!("【2026年最新】{keyword}の完全ガイド｜初心者が今すぐやるべきこと"),
            format!("{keyword}について初心者向けに基本から解説。"),
        ),
        result(
            2,
            format!("{keyword}とは？基本から実践まで徹底解説"),
            format!("{keyword}の基本を網羅的に解説します。"),
        ),
        result(
            3,
            format!("初心者でもできる{keyword}15選｜無料ツールも紹介"),
            format!("{keyword}の具体的な方法を15個紹介。"),
        ),
        result(
            4,
            format!("{keyword}で最初にやるべき7つのこと【保存版】"),
            format!("{keyword}の優先順位を解説。"),
        ),
        result(
            5,
            format!("{keyword}の基本と効果が出るまでの期間"),
            format!("{keyword}の効果と期間について。"),
        ),
    ]
}

/// Competitor records with realistic heading outlines, aligned with [`search_results`].
pub fn competitors(keyword: &str) -> Vec<CompetitorResult> {
    let mut tokens = keyword.split_whitespace();
    let main = tokens.next().unwrap_or(keyword);
    let sub = tokens.next().unwrap_or(main);

    let h2 = |text: String| Heading::new("h2", text);
    let h3 = |text: String| Heading::new("h3", text);
    let fixed_h2 = |text: &str| Heading::new("h2", text);
    let fixed_h3 = |text: &str| Heading::new("h3", text);

    let outlines: [(usize, Vec<Heading>); 5] = [
        (
            8500,
            vec![
                h2(format!("{keyword}とは？基本概念を理解しよう")),
                h3(format!("{main}の定義と重要性")),
                h3(format!("なぜ今{keyword}が注目されているのか")),
                h2(format!("{keyword}を始める前に知っておくべきこと")),
                fixed_h3("必要なツールと準備"),
                fixed_h3("初心者がよくやる失敗パターン"),
                h2(format!("{keyword}の具体的なやり方5ステップ")),
                fixed_h3("ステップ1：目標設定とキーワード選定"),
                fixed_h3("ステップ2：競合リサーチと分析"),
                fixed_h3("ステップ3：コンテンツの作成"),
                fixed_h3("ステップ4：内部対策と技術的な最適化"),
                fixed_h3("ステップ5：効果測定と改善"),
                h2(format!("{keyword}に役立つおすすめツール")),
                h2(format!("{keyword}の成功事例")),
                h2(format!("まとめ：{keyword}で成果を出すコツ")),
            ],
        ),
        (
            7200,
            vec![
                h2(format!("{keyword}の基礎知識")),
                h3(format!("{main}の仕組みと特徴")),
                h3(format!("{sub}との関連性")),
                h2(format!("{keyword}の実践テクニック")),
                fixed_h3("効果的なキーワード選定の方法"),
                fixed_h3("コンテンツSEOの基本"),
                fixed_h3("被リンク獲得の戦略"),
                h2(format!("{keyword}でよくある質問")),
                h2(format!("{keyword}の最新トレンド")),
                fixed_h2("まとめ"),
            ],
        ),
        (
            6800,
            vec![
                h2(format!("{keyword}で重要な要素とは")),
                fixed_h3("検索エンジンの評価基準"),
                fixed_h3("ユーザー体験の重要性"),
                h2(format!("{keyword}のおすすめ施策15選")),
                fixed_h3("タイトルタグの最適化"),
                fixed_h3("メタディスクリプションの書き方"),
                fixed_h3("見出し構造の設計"),
                fixed_h3("内部リンクの最適化"),
                fixed_h3("画像のalt属性設定"),
                fixed_h2("無料で使えるおすすめツール5選"),
                fixed_h3("Google Search Console"),
                fixed_h3("Google Analytics"),
                h2(format!("まとめ：{keyword}は継続が大事")),
            ],
        ),
        (
            5500,
            vec![
                h2(format!("{keyword}の全体像を把握する")),
                fixed_h2("サイト構造を最適化する"),
                fixed_h3("サイトマップの作成"),
                fixed_h3("URL設計のポイント"),
                fixed_h2("質の高いコンテンツを作る"),
                fixed_h3("検索意図を理解する"),
                fixed_h3("E-E-A-Tを意識した執筆"),
                fixed_h2("テクニカルSEOの基本"),
                fixed_h2("効果測定の方法"),
                fixed_h2("まとめ"),
            ],
        ),
        (
            4800,
            vec![
                h2(format!("{keyword}とは何か")),
                h2(format!("{keyword}の効果が出るまでの期間")),
                fixed_h3("短期的に効果が出る施策"),
                fixed_h3("長期的に取り組む施策"),
                h2(format!("{keyword}の費用対効果")),
                fixed_h3("自社で行う場合のコスト"),
                fixed_h3("外注する場合の相場"),
                h2(format!("{keyword}の今後の展望")),
                fixed_h2("まとめ"),
            ],
        ),
    ];

    search_results(keyword)
        .into_iter()
        .zip(outlines)
        .enumerate()
        .map(|(i, (result, (word_count, headings)))| CompetitorResult {
            rank: i + 1,
            title: result.title,
            url: result.url,
            snippet: result.snippet,
            word_count,
            headings,
        })
        .collect()
}
