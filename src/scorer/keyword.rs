use super::types::{FactorScores, KeywordBreakdown, KEYWORD_HEADER};
use crate::config::ScoringWeights;
use crate::export::ExportTable;
use crate::metrics::{MetricRecord, MetricStore};
use tracing::{debug, error};

const FACTOR_MAX: f64 = 10.0;

#[inline(always)]
fn clamp_factor(x: f64) -> f64 {
    x.clamp(0.0, FACTOR_MAX)
}

/// Linear penalty that reaches 0 at twice the base.
#[inline(always)]
fn linear_floor(value: f64, base: f64) -> f64 {
    FACTOR_MAX - (value / (base * 2.0) * FACTOR_MAX).min(FACTOR_MAX)
}

pub fn normalize_factors(record: &MetricRecord, weights: &ScoringWeights) -> FactorScores {
    FactorScores {
        // Raw difficulty is 0 = best, 10 = worst.
        norm_diff: clamp_factor(FACTOR_MAX - record.avg_difficulty),
        norm_traffic: clamp_factor(record.traffic),
        norm_apps: clamp_factor(linear_floor(record.avg_apps, weights.apps_base)),
        norm_keylen: clamp_factor(linear_floor(record.key_length as f64, weights.keylen_base)),
    }
}

/// Weighted sum of the normalized factors.
///
/// Note: the traffic weight is added to the traffic factor, not multiplied
/// with it.
#[inline]
pub fn weighted_score(f: &FactorScores, weights: &ScoringWeights) -> f64 {
    weights.w_diff * f.norm_diff
        + weights.w_traffic
        + f.norm_traffic
        + weights.w_apps * f.norm_apps
        + weights.w_keylen * f.norm_keylen
}

/// Scores every record of `store` in place and returns the breakdowns in
/// store order.
///
/// Returns an empty list, leaving the store unscored, when the weights do not
/// sum to 1.0.
pub fn score_keywords(store: &mut MetricStore, weights: &ScoringWeights) -> Vec<KeywordBreakdown> {
    if let Err(e) = weights.check_weight_sum() {
        error!("Factor weights don't add up to 100%: {}", e);
        return Vec::new();
    }

    let mut out = Vec::with_capacity(store.len());
    for record in store.records_mut() {
        let factors = normalize_factors(record, weights);
        let score = weighted_score(&factors, weights);
        record.score = Some(score);

        out.push(KeywordBreakdown {
            key: record.key.clone(),
            score,
            avg_difficulty: record.avg_difficulty,
            traffic: record.traffic,
            avg_apps: record.avg_apps,
            key_len: record.key_length,
            factors,
        });
    }

    debug!("   -> Scored {} keys", out.len());
    out
}

pub fn keyword_table(name: &'static str, breakdowns: &[KeywordBreakdown]) -> ExportTable {
    let rows = breakdowns.iter().map(KeywordBreakdown::to_row).collect();
    ExportTable::new(name, Some(&KEYWORD_HEADER[..]), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(avg_diff: f64, traffic: f64, avg_apps: f64, key: &str) -> MetricRecord {
        MetricRecord::new(key, traffic, avg_diff, avg_apps, avg_diff, avg_apps)
    }

    #[test]
    fn apps_at_twice_the_base_floor_to_zero() {
        let w = ScoringWeights::default();
        let f = normalize_factors(&record(0.0, 0.0, 7000.0, "a"), &w);
        assert_eq!(f.norm_apps, 0.0);
        let f = normalize_factors(&record(0.0, 0.0, 3500.0, "a"), &w);
        assert_eq!(f.norm_apps, 5.0);
    }

    #[test]
    fn long_keys_floor_to_zero() {
        let w = ScoringWeights::default();
        let f = normalize_factors(&record(0.0, 0.0, 0.0, "abcdefghijklmn"), &w);
        assert_eq!(f.norm_keylen, 0.0);
        let f = normalize_factors(&record(0.0, 0.0, 0.0, "abcdef"), &w);
        assert_eq!(f.norm_keylen, 5.0);
    }

    #[test]
    fn out_of_range_metrics_are_clamped() {
        let w = ScoringWeights::default();
        let f = normalize_factors(&record(12.0, 14.0, 0.0, "a"), &w);
        assert_eq!(f.norm_diff, 0.0);
        assert_eq!(f.norm_traffic, 10.0);
    }

    #[test]
    fn failed_weight_check_leaves_store_unscored() {
        let mut store: MetricStore = [record(1.0, 1.0, 1.0, "a")].into_iter().collect();
        let w = ScoringWeights {
            w_diff: 0.9,
            ..Default::default()
        };
        assert!(score_keywords(&mut store, &w).is_empty());
        assert_eq!(store.score_of("a"), None);
    }
}
