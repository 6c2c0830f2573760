mod common;

use common::{pair_rows, RowBuilder};
use keylist::config::{Config, ExportPaths};
use keylist::error::KeylistError;
use keylist::export::ExportSinks;
use keylist::metrics::MetricStore;
use keylist::pipeline::SelectionPipeline;
use keylist::scorer::KEY_SCORE_SHARE;
use std::fs;

fn config(min: usize, max: usize, dual: bool) -> Config {
    let mut config = Config::default();
    config.selection.min_keylist_len = min;
    config.selection.max_keylist_len = max;
    config.selection.include_dual_keys = dual;
    config
}

#[test]
fn test_end_to_end_short_pool() {
    let mut keys = common::store(&[
        RowBuilder::new("a"),
        RowBuilder::new("b"),
        RowBuilder::new("c"),
    ]);
    let mut pairs = MetricStore::new();

    let pipeline = SelectionPipeline::new(config(0, 100, true)).unwrap();
    let report = pipeline
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();

    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.best.keylist, "a,b,c");
    // empty keypair store disables dual keys
    assert!(!report.dual_keys_used);
    assert_eq!(report.candidates[0].keypair_score, 0.0);
    assert_eq!(report.best.score, report.candidates[0].norm_key_score);
}

#[test]
fn test_best_candidate_has_highest_traffic() {
    // pool is 23 chars; with max 11 each pair of 5-char keys is a candidate
    let mut keys = common::store(&[
        RowBuilder::new("alpha").traffic(2.0),
        RowBuilder::new("bravo").traffic(9.0),
        RowBuilder::new("charl").traffic(8.0),
        RowBuilder::new("delta").traffic(1.0),
    ]);
    let mut pairs = MetricStore::new();

    let pipeline = SelectionPipeline::new(config(0, 11, false)).unwrap();
    let report = pipeline
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();

    assert_eq!(report.candidates.len(), 6);
    assert_eq!(report.best.keylist, "bravo,charl");
    assert_eq!(report.ranked()[0].keylist.joined(), "bravo,charl");
}

#[test]
fn test_keypair_bonus_changes_the_winner() {
    // "angry" + "birds" lose on keyword scores alone, but the pair phrase is strong
    let mut keys = common::store(&[
        RowBuilder::new("angry").traffic(5.0),
        RowBuilder::new("birds").traffic(5.0),
        RowBuilder::new("games").traffic(5.2),
    ]);
    let mut pair_data = pair_rows(&["angry", "birds", "games"], 0.0);
    for row in pair_data.iter_mut() {
        if row.line().starts_with("angry birds") || row.line().starts_with("birds angry") {
            *row = row.clone().traffic(10.0).diff(0.0).apps(0.0);
        }
    }
    let mut pairs = common::store(&pair_data);

    let without = SelectionPipeline::new(config(0, 11, false))
        .unwrap()
        .run(&mut keys.clone(), &mut pairs.clone(), &mut ExportSinks::none())
        .unwrap();
    assert_ne!(without.best.keylist, "angry,birds");

    let with = SelectionPipeline::new(config(0, 11, true))
        .unwrap()
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();
    assert!(with.dual_keys_used);
    assert_eq!(with.best.keylist, "angry,birds");

    let best = &with.candidates[with
        .candidates
        .iter()
        .position(|c| c.keylist.joined() == "angry,birds")
        .unwrap()];
    let expected = KEY_SCORE_SHARE * best.norm_key_score + best.norm_keypair_score / 3.0;
    assert!((best.cumulative_score - expected).abs() < 1e-12);
}

#[test]
fn test_missing_keypair_data_sinks_candidate() {
    let mut keys = common::store(&[
        RowBuilder::new("angry").traffic(9.0),
        RowBuilder::new("birds").traffic(9.0),
        RowBuilder::new("games").traffic(1.0),
    ]);
    // no phrase involving "angry" and "birds" together
    let mut pairs = common::store(&[
        RowBuilder::new("angry games"),
        RowBuilder::new("games angry"),
        RowBuilder::new("birds games"),
        RowBuilder::new("games birds"),
    ]);

    let report = SelectionPipeline::new(config(0, 11, true))
        .unwrap()
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();

    let sunk = report
        .candidates
        .iter()
        .find(|c| c.keylist.joined() == "angry,birds")
        .unwrap();
    assert_eq!(sunk.keypair_score, -99.0);
    assert!(sunk.norm_keypair_score < 0.0);
    assert_ne!(report.best.keylist, "angry,birds");
}

#[test]
fn test_empty_candidate_set_is_not_fatal() {
    let mut keys = common::store(&[RowBuilder::new("aaaaa"), RowBuilder::new("bbbbb")]);
    let mut pairs = MetricStore::new();

    let report = SelectionPipeline::new(config(3, 4, false))
        .unwrap()
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();

    assert!(report.candidates.is_empty());
    assert!(report.best.is_empty());
    assert_eq!(report.best.score, 0.0);
}

#[test]
fn test_no_keywords_halts() {
    let pipeline = SelectionPipeline::new(config(0, 100, true)).unwrap();
    let err = pipeline
        .run(
            &mut MetricStore::new(),
            &mut MetricStore::new(),
            &mut ExportSinks::none(),
        )
        .unwrap_err();
    assert!(matches!(err, KeylistError::NoKeywords));
}

#[test]
fn test_bad_weights_are_rejected_up_front() {
    let mut cfg = config(0, 100, false);
    cfg.weights.w_apps = 0.5;
    assert!(matches!(
        SelectionPipeline::new(cfg),
        Err(KeylistError::Weights(_))
    ));
}

#[test]
fn test_negative_weights_are_rejected() {
    let mut cfg = config(0, 13, true);
    cfg.weights.w_diff = -1.0;
    cfg.weights.w_traffic = 2.0;
    cfg.weights.w_apps = 0.0;
    cfg.weights.w_keylen = 0.0;
    assert!(matches!(
        SelectionPipeline::new(cfg),
        Err(KeylistError::Config(_))
    ));
}

#[test]
fn test_sentinel_candidate_never_wins() {
    // "a" and "b" dominate on keyword scores but their pair phrase is missing
    let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let mut keys = common::store(
        &names
            .iter()
            .map(|k| {
                let traffic = if *k == "a" || *k == "b" { 10.0 } else { 0.0 };
                RowBuilder::new(k).traffic(traffic)
            })
            .collect::<Vec<_>>(),
    );
    let pair_data: Vec<RowBuilder> = pair_rows(&names, 0.0)
        .into_iter()
        .filter(|r| !r.line().starts_with("a b,") && !r.line().starts_with("b a,"))
        .collect();
    let mut pairs = common::store(&pair_data);

    let mut cfg = config(0, 13, true);
    cfg.weights.w_diff = 0.0;
    cfg.weights.w_traffic = 1.0;
    cfg.weights.w_apps = 0.0;
    cfg.weights.w_keylen = 0.0;

    let report = SelectionPipeline::new(cfg)
        .unwrap()
        .run(&mut keys, &mut pairs, &mut ExportSinks::none())
        .unwrap();

    // every 7-key subset of the 8 keys
    assert_eq!(report.candidates.len(), 8);
    let sunk = report
        .candidates
        .iter()
        .filter(|c| c.keypair_score == -99.0)
        .count();
    assert_eq!(sunk, 6);

    let winner = report
        .candidates
        .iter()
        .find(|c| c.keylist.joined() == report.best.keylist)
        .unwrap();
    assert!(winner.keypair_score >= 0.0);
    assert!(!(winner.keylist.keys().contains(&"a".to_string())
        && winner.keylist.keys().contains(&"b".to_string())));
}

#[test]
fn test_exports_are_written_with_headers() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ExportPaths {
        out_keylists: Some(dir.path().join("keylists.csv")),
        out_key_scores: Some(dir.path().join("key_scores.csv")),
        out_keypair_scores: Some(dir.path().join("keypair_scores.csv")),
        out_keylist_scores: Some(dir.path().join("keylist_scores.csv")),
        out_keylist_keypair_scores: Some(dir.path().join("keylist_keypair_scores.csv")),
        out_cumulative: Some(dir.path().join("cumulative.csv")),
    };

    let mut keys = common::store(&[
        RowBuilder::new("alpha"),
        RowBuilder::new("bravo"),
        RowBuilder::new("charl"),
    ]);
    let mut pairs = common::store(&pair_rows(&["alpha", "bravo", "charl"], 5.0));

    let mut sinks = ExportSinks::from_paths(&paths);
    let report = SelectionPipeline::new(config(0, 11, true))
        .unwrap()
        .run(&mut keys, &mut pairs, &mut sinks)
        .unwrap();
    assert_eq!(report.candidates.len(), 3);

    let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();

    let keylists = read("keylists.csv");
    assert_eq!(keylists.lines().count(), 3);
    assert!(keylists.lines().all(|l| l.split(',').count() == 2));

    let key_scores = read("key_scores.csv");
    assert!(key_scores.starts_with(
        "key,score,avg_difficulty,traffic,avg_apps,key_len,norm_diff,norm_traffic,norm_apps,norm_keylen\n"
    ));
    assert_eq!(key_scores.lines().count(), 4);

    assert_eq!(read("keypair_scores.csv").lines().count(), 7);

    let keylist_scores = read("keylist_scores.csv");
    assert!(keylist_scores.starts_with("keylist;score;norm_score;max_score;length;words\n"));

    let keypair = read("keylist_keypair_scores.csv");
    assert!(keypair.starts_with("keylist;score;norm_score;max_score;length;words;permutations\n"));
    assert!(keypair.contains("['alpha bravo', 'bravo alpha']"));

    let cumulative = read("cumulative.csv");
    assert!(cumulative
        .starts_with("keylist;key_score;keypair_score;cumulative_score;length;words\n"));
    assert_eq!(cumulative.lines().count(), 4);
}
