use crate::reports;
use clap::Args;
use keylist::combinations::{candidates_table, generate_candidates, LengthBounds};
use keylist::config::Config;
use keylist::error::KlResult;
use keylist::export::{emit, ExportSinks};
use keylist::metrics::MetricStore;

#[derive(Args, Debug, Clone)]
pub struct CombosArgs {
    #[command(flatten)]
    pub config: Config,

    /// Number of candidates to print
    #[arg(short = 'l', long, default_value_t = 20)]
    pub limit: usize,
}

pub fn run(args: CombosArgs, config: Config, key_store: MetricStore) -> KlResult<()> {
    config.selection.validate()?;
    let bounds = LengthBounds::new(
        config.selection.min_keylist_len,
        config.selection.max_keylist_len,
    );

    let candidates = generate_candidates(&key_store.keys(), bounds);

    let mut sinks = ExportSinks::from_paths(&config.exports);
    emit(&mut sinks.keylists, || candidates_table(&candidates))?;

    reports::print_candidates(&candidates, args.limit);
    println!("\nCandidates: {}", candidates.len());
    Ok(())
}
