use super::keylist::sum_scores;
use super::normalize;
use super::types::{KeypairScore, KEYPAIR_HEADER};
use crate::combinations::Keylist;
use crate::export::ExportTable;
use crate::metrics::MetricStore;
use itertools::Itertools;
use rayon::prelude::*;

pub const PAIR_SEPARATOR: &str = " ";

/// All ordered two-key phrases of `keys`.
///
/// `["math", "physics", "practice"]` gives `"math physics"`, `"math practice"`,
/// `"physics math"`, `"physics practice"`, `"practice math"`, `"practice physics"`.
pub fn keypair_phrases(keys: &[String]) -> Vec<String> {
    keys.iter()
        .permutations(2)
        .map(|pair| pair.into_iter().join(PAIR_SEPARATOR))
        .collect()
}

/// Keypair score of a keylist of single-char keywords where every ordered
/// pair scores 10.
pub fn keypair_max_score(max_keylist_len: usize) -> f64 {
    let max_keys = max_keylist_len as f64 / 2.0;
    let max_perms = max_keys * (max_keys - 1.0);
    max_perms * 10.0
}

/// Scores the ordered keyword pairs of every candidate against a scored
/// keypair store. Output is aligned by index with `candidates`.
pub fn score_keypairs(
    candidates: &[Keylist],
    keypair_store: &MetricStore,
    max_keylist_len: usize,
) -> Vec<KeypairScore> {
    let max_score = keypair_max_score(max_keylist_len);

    candidates
        .par_iter()
        .map(|c| {
            let permutations = keypair_phrases(c.keys());
            let score = sum_scores(permutations.iter().map(String::as_str), keypair_store);
            let keylist = c.joined();
            KeypairScore {
                length: keylist.chars().count(),
                keylist,
                score,
                norm_score: normalize(score, max_score),
                max_score,
                words: c.word_count(),
                permutations,
            }
        })
        .collect()
}

pub fn keypair_table(scores: &[KeypairScore]) -> ExportTable {
    let rows = scores.iter().map(KeypairScore::to_row).collect();
    ExportTable::new("keylist keypair scores", Some(&KEYPAIR_HEADER[..]), rows)
}
