use lexigrade_config::Config;
use lexigrade_lang_english::EnglishPipeline;
use lexigrade_types::CefrLevel;

use crate::report;

fn pipeline() -> EnglishPipeline {
    EnglishPipeline::from_config(&Config::default())
}

#[test]
fn classify_report_serializes_levels_and_sources_as_strings() {
    let mut p = pipeline();
    let report = report::classify(&mut p, "the cat", false);
    let json = serde_json::to_value(&report).unwrap();

    let words = json["words"].as_array().unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0]["word"], "the");
    assert_eq!(words[0]["cefr_level"], "A1");
    assert_eq!(words[0]["source"], "OXFORD_3000");
}

#[test]
fn stats_block_only_appears_when_requested() {
    let mut p = pipeline();

    let without = report::classify(&mut p, "the cat", false);
    assert!(without.stats.is_none());
    let json = serde_json::to_value(&without).unwrap();
    assert!(json.get("stats").is_none());

    let with = report::classify(&mut p, "the cat", true);
    let stats = with.stats.unwrap();
    assert_eq!(stats.total_words, 2);
}

#[test]
fn score_report_band_is_consistent_with_the_score() {
    let mut p = pipeline();
    let report = report::score(&mut p, "The cat and the dog run to the house.", None);

    assert!(report.score <= 100);
    match report.score {
        0..=24 => assert_eq!(report.band, CefrLevel::A1),
        25..=39 => assert_eq!(report.band, CefrLevel::A2),
        40..=54 => assert_eq!(report.band, CefrLevel::B1),
        55..=69 => assert_eq!(report.band, CefrLevel::B2),
        70..=84 => assert_eq!(report.band, CefrLevel::C1),
        _ => assert_eq!(report.band, CefrLevel::C2),
    }
}

#[test]
fn genre_flags_reach_the_scorer() {
    let mut p = pipeline();
    let text = "Preliminary analysis must acknowledge the significant hypothesis \
                and assess the academic context with considerable emphasis.";

    let plain = report::score(&mut p, text, None);
    let genres = vec!["animation".to_string()];
    let eased = report::score(&mut p, text, Some(&genres));

    assert!(eased.score <= plain.score);
}

#[test]
fn empty_input_produces_an_empty_but_valid_report() {
    let mut p = pipeline();

    let classify = report::classify(&mut p, "", true);
    assert!(classify.words.is_empty());
    assert_eq!(classify.stats.unwrap().total_words, 0);

    let score = report::score(&mut p, "", None);
    assert_eq!(score.score, 0);
    assert!(score.breakdown.is_empty());
}
