use crate::error::{KeylistError, KlResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tolerance for the weight sum check.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-9;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub selection: SelectionParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
    #[command(flatten)]
    pub exports: ExportPaths,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParams {
    /// Max char length of a keyword list
    #[arg(long, default_value_t = 100)]
    pub max_keylist_len: usize,
    /// Min char length of a keyword list
    #[arg(long, default_value_t = 90)]
    pub min_keylist_len: usize,
    /// Include the score of dual keyword phrases when ranking keylists
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub include_dual_keys: bool,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            max_keylist_len: 100,
            min_keylist_len: 90,
            include_dual_keys: true,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === FACTOR WEIGHTS (must sum to 1.0) ===
    #[arg(long, default_value_t = 0.55)]
    pub w_diff: f64,
    #[arg(long, default_value_t = 0.35)]
    pub w_traffic: f64,
    #[arg(long, default_value_t = 0.05)]
    pub w_apps: f64,
    #[arg(long, default_value_t = 0.05)]
    pub w_keylen: f64,

    // === NORMALIZATION BASES ===
    // Average number of apps using the keys of the top 200 free apps.
    #[arg(long, default_value_t = 3500.0)]
    pub apps_base: f64,
    // Average key length of the keys used by the top 200 free apps.
    #[arg(long, default_value_t = 6.0)]
    pub keylen_base: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            w_diff: 0.55,
            w_traffic: 0.35,
            w_apps: 0.05,
            w_keylen: 0.05,
            apps_base: 3500.0,
            keylen_base: 6.0,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportPaths {
    /// Candidate keylists, one row per candidate
    #[arg(long)]
    pub out_keylists: Option<PathBuf>,
    /// Per-keyword score breakdown
    #[arg(long)]
    pub out_key_scores: Option<PathBuf>,
    /// Per-keypair-phrase score breakdown
    #[arg(long)]
    pub out_keypair_scores: Option<PathBuf>,
    /// Per-keylist score breakdown
    #[arg(long)]
    pub out_keylist_scores: Option<PathBuf>,
    /// Per-keylist keypair breakdown
    #[arg(long)]
    pub out_keylist_keypair_scores: Option<PathBuf>,
    /// Cumulative summary per keylist
    #[arg(long)]
    pub out_cumulative: Option<PathBuf>,
}

impl ScoringWeights {
    pub fn weight_sum(&self) -> f64 {
        self.w_diff + self.w_traffic + self.w_apps + self.w_keylen
    }

    pub fn check_weight_sum(&self) -> KlResult<()> {
        let sum = self.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(KeylistError::Weights(sum));
        }
        Ok(())
    }

    pub fn validate(&self) -> KlResult<()> {
        self.check_weight_sum()?;
        let factors = [
            ("w_diff", self.w_diff),
            ("w_traffic", self.w_traffic),
            ("w_apps", self.w_apps),
            ("w_keylen", self.w_keylen),
        ];
        if let Some((name, w)) = factors.iter().find(|(_, w)| *w < 0.0) {
            return Err(KeylistError::Config(format!(
                "factor weight {} must not be negative (got {})",
                name, w
            )));
        }
        if self.apps_base <= 0.0 || self.keylen_base <= 0.0 {
            return Err(KeylistError::Config(format!(
                "normalization bases must be positive (apps_base={}, keylen_base={})",
                self.apps_base, self.keylen_base
            )));
        }
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KlResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn merge_from_cli(&mut self, cli_weights: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_weights.$field;
                }
            };
        }

        update_if_present!(w_diff);
        update_if_present!(w_traffic);
        update_if_present!(w_apps);
        update_if_present!(w_keylen);
        update_if_present!(apps_base);
        update_if_present!(keylen_base);
    }
}

impl SelectionParams {
    pub fn validate(&self) -> KlResult<()> {
        if self.max_keylist_len == 0 {
            return Err(KeylistError::Config(
                "max_keylist_len must be greater than 0".to_string(),
            ));
        }
        if self.min_keylist_len > self.max_keylist_len {
            return Err(KeylistError::Config(format!(
                "min_keylist_len ({}) exceeds max_keylist_len ({})",
                self.min_keylist_len, self.max_keylist_len
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> KlResult<()> {
        self.selection.validate()?;
        self.weights.validate()
    }
}
