use super::normalize;
use super::types::{KeylistScore, KEYLIST_HEADER, SENTINEL_SCORE};
use crate::combinations::Keylist;
use crate::export::ExportTable;
use crate::metrics::MetricStore;
use rayon::prelude::*;
use tracing::warn;

/// Score of a keylist made of single-char keywords that each score 10.
pub fn keylist_max_score(max_keylist_len: usize) -> f64 {
    max_keylist_len as f64 / 2.0 * 10.0
}

/// Sums the scores of `keys`, or returns the sentinel on the first key
/// without a usable score. A negative score counts as unusable.
pub fn sum_scores<'a, I>(keys: I, store: &MetricStore) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0.0;
    for key in keys {
        match store.score_of(key) {
            Some(s) if s >= 0.0 => total += s,
            Some(s) => {
                warn!("Negative score {} for key '{}'", s, key);
                return SENTINEL_SCORE;
            }
            None => {
                warn!("No score for key '{}'", key);
                return SENTINEL_SCORE;
            }
        }
    }
    total
}

/// Scores every candidate against a scored keyword store. The output is
/// aligned by index with `candidates`.
pub fn score_keylists(
    candidates: &[Keylist],
    store: &MetricStore,
    max_keylist_len: usize,
) -> Vec<KeylistScore> {
    let max_score = keylist_max_score(max_keylist_len);

    candidates
        .par_iter()
        .map(|c| {
            let score = sum_scores(c.keys().iter().map(String::as_str), store);
            let keylist = c.joined();
            KeylistScore {
                length: keylist.chars().count(),
                keylist,
                score,
                norm_score: normalize(score, max_score),
                max_score,
                words: c.word_count(),
            }
        })
        .collect()
}

pub fn keylist_table(scores: &[KeylistScore]) -> ExportTable {
    let rows = scores.iter().map(KeylistScore::to_row).collect();
    ExportTable::new("keylist scores", Some(&KEYLIST_HEADER[..]), rows)
}
