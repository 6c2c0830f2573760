use crate::combinations::Keylist;
use serde::Serialize;

/// Score of a keylist that references a key without metric data.
pub const SENTINEL_SCORE: f64 = -99.0;

pub const KEYWORD_HEADER: [&str; 10] = [
    "key",
    "score",
    "avg_difficulty",
    "traffic",
    "avg_apps",
    "key_len",
    "norm_diff",
    "norm_traffic",
    "norm_apps",
    "norm_keylen",
];

pub const KEYLIST_HEADER: [&str; 6] = [
    "keylist",
    "score",
    "norm_score",
    "max_score",
    "length",
    "words",
];

pub const KEYPAIR_HEADER: [&str; 7] = [
    "keylist",
    "score",
    "norm_score",
    "max_score",
    "length",
    "words",
    "permutations",
];

pub const CUMULATIVE_HEADER: [&str; 6] = [
    "keylist",
    "key_score",
    "keypair_score",
    "cumulative_score",
    "length",
    "words",
];

/// Decimal text for an export field. Whole numbers keep a trailing `.0`.
pub fn float_field(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}

/// Normalized factors of one keyword, each within [0, 10] (10 = best).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScores {
    pub norm_diff: f64,
    pub norm_traffic: f64,
    pub norm_apps: f64,
    pub norm_keylen: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordBreakdown {
    pub key: String,
    pub score: f64,
    pub avg_difficulty: f64,
    pub traffic: f64,
    pub avg_apps: f64,
    pub key_len: usize,
    pub factors: FactorScores,
}

impl KeywordBreakdown {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.key.clone(),
            float_field(self.score),
            float_field(self.avg_difficulty),
            float_field(self.traffic),
            float_field(self.avg_apps),
            self.key_len.to_string(),
            float_field(self.factors.norm_diff),
            float_field(self.factors.norm_traffic),
            float_field(self.factors.norm_apps),
            float_field(self.factors.norm_keylen),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeylistScore {
    pub keylist: String,
    pub score: f64,
    pub norm_score: f64,
    pub max_score: f64,
    pub length: usize,
    pub words: usize,
}

impl KeylistScore {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.keylist.clone(),
            float_field(self.score),
            float_field(self.norm_score),
            float_field(self.max_score),
            self.length.to_string(),
            self.words.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeypairScore {
    pub keylist: String,
    pub score: f64,
    pub norm_score: f64,
    pub max_score: f64,
    pub length: usize,
    pub words: usize,
    pub permutations: Vec<String>,
}

impl KeypairScore {
    pub fn to_row(&self) -> Vec<String> {
        let quoted: Vec<String> = self
            .permutations
            .iter()
            .map(|p| format!("'{}'", p))
            .collect();
        vec![
            self.keylist.clone(),
            float_field(self.score),
            float_field(self.norm_score),
            float_field(self.max_score),
            self.length.to_string(),
            self.words.to_string(),
            format!("[{}]", quoted.join(", ")),
        ]
    }
}

/// Final per-candidate result of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredKeylist {
    pub keylist: Keylist,
    pub key_score: f64,
    pub norm_key_score: f64,
    pub keypair_score: f64,
    pub norm_keypair_score: f64,
    pub cumulative_score: f64,
}

impl ScoredKeylist {
    /// Summary row: normalized key and keypair scores next to the cumulative one.
    pub fn to_row(&self) -> Vec<String> {
        let joined = self.keylist.joined();
        let length = joined.chars().count();
        vec![
            joined,
            float_field(self.norm_key_score),
            float_field(self.norm_keypair_score),
            float_field(self.cumulative_score),
            length.to_string(),
            self.keylist.word_count().to_string(),
        ]
    }
}
