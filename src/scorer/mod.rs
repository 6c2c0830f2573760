pub mod keylist;
pub mod keypair;
pub mod keyword;
pub mod types;

pub use self::keylist::{keylist_max_score, score_keylists};
pub use self::keypair::{keypair_max_score, keypair_phrases, score_keypairs};
pub use self::keyword::score_keywords;
pub use self::types::{
    FactorScores, KeylistScore, KeypairScore, KeywordBreakdown, ScoredKeylist, SENTINEL_SCORE,
};

/// Weight of the individual keyword score in the cumulative score.
pub const KEY_SCORE_SHARE: f64 = 2.0 / 3.0;
/// Weight of the keypair score in the cumulative score.
pub const KEYPAIR_SCORE_SHARE: f64 = 1.0 / 3.0;

/// Scales `score` by `max_score`. A non-positive maximum leaves the score
/// unscaled.
#[inline]
pub fn normalize(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        score / max_score
    } else {
        score
    }
}

/// Combines normalized keyword and keypair scores. Without keypair data the
/// keyword score is used as is.
#[inline]
pub fn cumulative_score(norm_key_score: f64, norm_keypair_score: Option<f64>) -> f64 {
    match norm_keypair_score {
        Some(pair) => KEY_SCORE_SHARE * norm_key_score + KEYPAIR_SCORE_SHARE * pair,
        None => norm_key_score,
    }
}
