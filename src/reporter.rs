use crate::article::Article;
use crate::models::{AnalysisReport, AnalysisResult, RankCheck, ScoreReport};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

/// Co-occurrence terms and heading patterns shown in text reports
const SHOWN_TERMS: usize = 20;
const SHOWN_HEADINGS: usize = 10;

pub struct Reporter;

impl Reporter {
    pub fn analysis_report(keyword: &str, analysis: AnalysisResult) -> AnalysisReport {
        AnalysisReport {
            keyword: keyword.to_string(),
            recommended_word_count: analysis.recommended_word_count(),
            analysis,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn score_report(keyword: &str, article: Article) -> ScoreReport {
        ScoreReport {
            keyword: keyword.to_string(),
            title: article.title,
            meta_description: article.meta_description,
            word_count: article.word_count,
            score: article.seo_score,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn score_colored(score: u32) -> ColoredString {
        if score >= 80 {
            score.to_string().bright_green()
        } else if score >= 60 {
            score.to_string().yellow()
        } else {
            score.to_string().bright_red()
        }
    }

    fn print_header(title: &str) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", title.bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();
    }

    pub fn print_analysis_report(report: &AnalysisReport) {
        Self::print_header("Kiji - Competitor Analysis");

        println!("{}: {}", "Keyword".bright_white().bold(), report.keyword);
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.timestamp
        );
        println!();

        let analysis = &report.analysis;

        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  Competitors Analyzed:   {}",
            analysis.competitors.len().to_string().bright_green()
        );
        println!(
            "  Average Characters:     {}",
            analysis.avg_word_count.to_string().bright_green()
        );
        println!(
            "  Recommended Characters: {}",
            report.recommended_word_count.to_string().bright_green()
        );
        println!();

        println!("{}", "Competitors".bright_yellow().bold().underline());
        for competitor in &analysis.competitors {
            println!();
            println!(
                "  {} {}",
                format!("#{}", competitor.rank).bright_white().bold(),
                competitor.title
            );
            println!("    URL:        {}", competitor.url.dimmed());
            println!(
                "    Characters: {}",
                if competitor.word_count == 0 {
                    "N/A".dimmed()
                } else {
                    competitor.word_count.to_string().bright_green()
                }
            );
            println!("    H2 count:   {}", competitor.count_tag("h2"));
        }
        println!();

        if !analysis.cooccurrence.is_empty() {
            println!("{}", "Co-occurring Terms".bright_yellow().bold().underline());
            let terms: Vec<String> = analysis
                .cooccurrence
                .iter()
                .take(SHOWN_TERMS)
                .map(|t| format!("{} ({})", t.word, t.score))
                .collect();
            println!("  {}", terms.join(", "));
            println!();
        }

        if !analysis.all_headings.is_empty() {
            println!("{}", "Common Headings".bright_yellow().bold().underline());
            for heading in analysis.all_headings.iter().take(SHOWN_HEADINGS) {
                println!(
                    "  [{}] {} {}",
                    heading.tag.bright_cyan(),
                    heading.text,
                    format!("x{}", heading.frequency).dimmed()
                );
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_score_report(report: &ScoreReport) {
        Self::print_header("Kiji - SEO Score");

        let score = &report.score;
        let details = &score.details;

        println!("{}: {}", "Keyword".bright_white().bold(), report.keyword);
        println!("{}: {}", "Title".bright_white().bold(), report.title);
        if !report.meta_description.is_empty() {
            println!(
                "{}: {}",
                "Meta".bright_white().bold(),
                report.meta_description
            );
        }
        println!();

        println!(
            "{} {}",
            "Overall:".bright_white().bold(),
            Self::score_colored(score.overall).bold()
        );
        println!(
            "  Keyword Density:       {}",
            Self::score_colored(score.keyword_density)
        );
        println!(
            "  Co-occurrence Coverage: {}",
            Self::score_colored(score.cooccurrence_coverage)
        );
        println!(
            "  Heading Structure:     {}",
            Self::score_colored(score.heading_structure)
        );
        println!(
            "  Length:                {}",
            Self::score_colored(score.word_count_score)
        );
        println!();

        println!("{}", "Details".bright_yellow().bold().underline());
        println!(
            "  Characters: {} / target {}",
            details.actual_word_count, details.target_word_count
        );
        println!("  Keyword occurrences: {}", details.keyword_count);
        if !details.covered_cooccurrences.is_empty() {
            println!(
                "  Covered: {}",
                details.covered_cooccurrences.join(", ").bright_green()
            );
        }
        if !details.missing_cooccurrences.is_empty() {
            println!(
                "  Missing: {}",
                details.missing_cooccurrences.join(", ").bright_red()
            );
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_rank_report(report: &RankCheck) {
        Self::print_header("Kiji - Ranking Check");

        println!("{}: {}", "Keyword".bright_white().bold(), report.keyword);
        println!("{}: {}", "Target".bright_white().bold(), report.target_url);
        println!(
            "{}: {}",
            "Checked".bright_white().bold(),
            report.checked_at
        );
        println!();

        match report.position {
            Some(position) => println!(
                "  Position: {}  {}",
                format!("#{}", position).bright_green().bold(),
                report.matched_url.dimmed()
            ),
            None => println!("  Position: {}", "not in top 20".bright_red()),
        }
        println!();

        println!("{}", "Top Results".bright_yellow().bold().underline());
        for entry in &report.top_results {
            println!("  {:>2}. {}", entry.rank, entry.title);
            println!("      {}", entry.url.dimmed());
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn save_json_report<T: Serialize>(report: &T, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)?;
        file.write_all(json.as_bytes())?;
        eprintln!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}
