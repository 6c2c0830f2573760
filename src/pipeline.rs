use crate::combinations::{candidates_table, generate_candidates, Keylist, LengthBounds};
use crate::config::Config;
use crate::error::{KeylistError, KlResult};
use crate::export::{emit, ExportSinks, ExportTable};
use crate::metrics::MetricStore;
use crate::scorer::keylist::keylist_table;
use crate::scorer::keypair::keypair_table;
use crate::scorer::keyword::keyword_table;
use crate::scorer::types::CUMULATIVE_HEADER;
use crate::scorer::{
    cumulative_score, score_keylists, score_keypairs, score_keywords, ScoredKeylist,
};
use serde::Serialize;
use tracing::{info, warn};

/// The winning keylist, comma-joined, and its cumulative score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub keylist: String,
    pub score: f64,
}

impl Selection {
    pub fn empty() -> Self {
        Self {
            keylist: String::new(),
            score: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keylist.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub candidates: Vec<ScoredKeylist>,
    pub best: Selection,
    pub dual_keys_used: bool,
}

impl SelectionReport {
    /// Candidates by descending cumulative score; ties keep candidate order.
    pub fn ranked(&self) -> Vec<&ScoredKeylist> {
        let mut ranked: Vec<&ScoredKeylist> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.cumulative_score.total_cmp(&a.cumulative_score));
        ranked
    }
}

/// Returns the highest scoring keylist. The first one wins ties.
pub fn get_best_keylist(keylists: &[Keylist], scores: &[f64]) -> Selection {
    let mut best: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate().take(keylists.len()) {
        match best {
            Some(b) if scores[b] >= score => {}
            _ if score.is_nan() => {}
            _ => best = Some(i),
        }
    }

    match best {
        Some(i) => Selection {
            keylist: keylists[i].joined(),
            score: scores[i],
        },
        None => {
            warn!("Provided empty keylist.");
            Selection::empty()
        }
    }
}

pub struct SelectionPipeline {
    config: Config,
}

impl SelectionPipeline {
    pub fn new(config: Config) -> KlResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bounds(&self) -> LengthBounds {
        LengthBounds::new(
            self.config.selection.min_keylist_len,
            self.config.selection.max_keylist_len,
        )
    }

    /// Runs enumeration, keyword, keylist and keypair scoring in order and
    /// picks the best candidate.
    ///
    /// Both stores are scored in place. Keypair scoring is skipped when it is
    /// disabled or `keypair_store` is empty.
    pub fn run(
        &self,
        key_store: &mut MetricStore,
        keypair_store: &mut MetricStore,
        sinks: &mut ExportSinks,
    ) -> KlResult<SelectionReport> {
        if key_store.is_empty() {
            return Err(KeylistError::NoKeywords);
        }

        let weights = &self.config.weights;
        let max_len = self.config.selection.max_keylist_len;

        let mut dual_keys = self.config.selection.include_dual_keys;
        if dual_keys && keypair_store.is_empty() {
            warn!("No dual keyword permutations found. Skipping score calculation step for dual key permutations.");
            dual_keys = false;
        }

        // 1. Candidates
        let candidates = generate_candidates(&key_store.keys(), self.bounds());
        emit(&mut sinks.keylists, || candidates_table(&candidates))?;

        // 2. Individual keyword scores
        let key_breakdown = score_keywords(key_store, weights);
        if key_breakdown.is_empty() {
            return Err(KeylistError::Weights(weights.weight_sum()));
        }
        emit(&mut sinks.key_scores, || {
            keyword_table("key scores", &key_breakdown)
        })?;

        // 3. Keylist scores
        let keylist_scores = score_keylists(&candidates, key_store, max_len);
        emit(&mut sinks.keylist_scores, || keylist_table(&keylist_scores))?;

        // 4. Keypair scores
        let keypair_scores = if dual_keys {
            let pair_breakdown = score_keywords(keypair_store, weights);
            emit(&mut sinks.keypair_scores, || {
                keyword_table("keypair scores", &pair_breakdown)
            })?;

            let scores = score_keypairs(&candidates, keypair_store, max_len);
            emit(&mut sinks.keylist_keypair_scores, || keypair_table(&scores))?;
            Some(scores)
        } else {
            None
        };

        // 5. Cumulative scores
        let scored: Vec<ScoredKeylist> = candidates
            .iter()
            .enumerate()
            .map(|(i, keylist)| {
                let key = &keylist_scores[i];
                let pair = keypair_scores.as_ref().map(|s| &s[i]);
                ScoredKeylist {
                    keylist: keylist.clone(),
                    key_score: key.score,
                    norm_key_score: key.norm_score,
                    keypair_score: pair.map_or(0.0, |p| p.score),
                    norm_keypair_score: pair.map_or(0.0, |p| p.norm_score),
                    cumulative_score: cumulative_score(key.norm_score, pair.map(|p| p.norm_score)),
                }
            })
            .collect();

        emit(&mut sinks.cumulative, || {
            let rows = scored.iter().map(ScoredKeylist::to_row).collect();
            ExportTable::new("cumulative scores", Some(&CUMULATIVE_HEADER[..]), rows)
        })?;

        // 6. Selection
        let cumulative: Vec<f64> = scored.iter().map(|s| s.cumulative_score).collect();
        let best = get_best_keylist(&candidates, &cumulative);
        if !best.is_empty() {
            info!(
                "Best keylist ({}) scores {:.4} out of {} candidates",
                best.keylist,
                best.score,
                scored.len()
            );
        }

        Ok(SelectionReport {
            candidates: scored,
            best,
            dual_keys_used: dual_keys,
        })
    }
}
