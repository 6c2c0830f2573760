use crate::export::ExportTable;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, warn};

pub const KEY_SEPARATOR: &str = ",";

/// Keywords interpreted as one comma-joined search phrase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keylist {
    keys: Vec<String>,
}

impl Keylist {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn word_count(&self) -> usize {
        self.keys.len()
    }

    pub fn composite_length(&self) -> usize {
        composite_length(&self.keys)
    }

    pub fn joined(&self) -> String {
        self.keys.join(KEY_SEPARATOR)
    }

    pub fn key_set(&self) -> BTreeSet<&str> {
        self.keys.iter().map(String::as_str).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Keylist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Char length of `keys` joined by single-char separators.
pub fn composite_length<S: AsRef<str>>(keys: &[S]) -> usize {
    let chars: usize = keys.iter().map(|k| k.as_ref().chars().count()).sum();
    chars + keys.len().saturating_sub(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min_len: usize,
    pub max_len: usize,
}

impl LengthBounds {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    #[inline]
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min_len && len <= self.max_len
    }
}

/// Builds the candidate set for a keyword pool.
///
/// Every candidate lies within `bounds`, no two candidates share a key-set and
/// no candidate's key-set is contained in another's. When the whole pool fits
/// into `bounds.max_len` the pool itself is the only candidate. A keyword
/// repeated in `keys` is only considered once.
pub fn generate_candidates(keys: &[String], bounds: LengthBounds) -> Vec<Keylist> {
    info!("Input keys: {:?}", keys);

    let pool = distinct_keys(keys);
    if composite_length(&pool[..]) <= bounds.max_len {
        info!("Input keys below max char length. Including all keys.");
        return vec![Keylist::new(pool)];
    }

    let in_bounds = enumerate_in_bounds(&pool, bounds);
    debug!("   -> {} combinations within bounds", in_bounds.len());

    let candidates: Vec<Keylist> = drop_subsets(in_bounds)
        .into_iter()
        .map(|combo| combo.iter().map(|&i| pool[i].clone()).collect())
        .collect();
    info!("Generated {} candidate keylists", candidates.len());
    candidates
}

/// `keys` without repeats, first occurrence kept.
fn distinct_keys(keys: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(keys.len());
    let pool: Vec<String> = keys
        .iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect();
    if pool.len() < keys.len() {
        warn!("Ignoring {} repeated input keys", keys.len() - pool.len());
    }
    pool
}

/// Index combinations of every size whose composite length lies within
/// bounds. Indices are ascending, so members keep the pool's order and no two
/// combinations share a key-set.
fn enumerate_in_bounds(keys: &[String], bounds: LengthBounds) -> Vec<Vec<usize>> {
    let lengths: Vec<usize> = keys.iter().map(|k| k.chars().count()).collect();

    let mut shortest = lengths.clone();
    shortest.sort_unstable();

    let mut out = Vec::new();
    let mut shortest_sum = 0;

    for size in 0..=keys.len() {
        if size > 0 {
            shortest_sum += shortest[size - 1];
        }
        // Adding members never shortens a combination, so no larger size fits either.
        if shortest_sum + size.saturating_sub(1) > bounds.max_len {
            break;
        }

        for combo in (0..keys.len()).combinations(size) {
            let len = combo.iter().map(|&i| lengths[i]).sum::<usize>() + size.saturating_sub(1);
            if bounds.contains(len) {
                out.push(combo);
            }
        }
    }
    out
}

/// Whether ascending `small` is contained in ascending `large`.
fn is_sorted_subset(small: &[usize], large: &[usize]) -> bool {
    let mut rest = large.iter();
    small.iter().all(|x| rest.any(|y| y == x))
}

/// Keeps only combinations not contained in another combination.
///
/// Containment is checked against the full set, so the result is exactly the
/// set of maximal key-sets regardless of visiting order.
fn drop_subsets(combos: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let keep: Vec<bool> = (0..combos.len())
        .into_par_iter()
        .map(|i| {
            let small = &combos[i];
            !combos.iter().enumerate().any(|(j, other)| {
                i != j && small.len() < other.len() && is_sorted_subset(small, other)
            })
        })
        .collect();

    combos
        .into_iter()
        .zip(keep)
        .filter_map(|(c, k)| k.then_some(c))
        .collect()
}

/// One row per candidate, fields are the member keywords.
pub fn candidates_table(candidates: &[Keylist]) -> ExportTable {
    let rows = candidates.iter().map(|c| c.keys().to_vec()).collect();
    ExportTable::new("keylists", None, rows)
}
