use crate::reports;
use clap::Args;
use keylist::config::Config;
use keylist::error::{KeylistError, KlResult};
use keylist::export::{emit, ExportSinks};
use keylist::metrics::MetricStore;
use keylist::scorer::keyword::keyword_table;
use keylist::scorer::score_keywords;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Sort keywords by descending score instead of input order
    #[arg(long, default_value_t = false)]
    pub sorted: bool,
}

pub fn run(args: ScoreArgs, config: Config, mut key_store: MetricStore) -> KlResult<()> {
    let weights = &config.weights;
    weights.validate()?;
    let mut breakdown = score_keywords(&mut key_store, weights);
    if breakdown.is_empty() {
        return Err(KeylistError::Weights(weights.weight_sum()));
    }

    let mut sinks = ExportSinks::from_paths(&config.exports);
    emit(&mut sinks.key_scores, || keyword_table("key scores", &breakdown))?;

    if args.sorted {
        breakdown.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
    reports::print_keyword_scores("Keyword", &breakdown);
    Ok(())
}
