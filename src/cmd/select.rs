use crate::reports;
use clap::Args;
use keylist::config::Config;
use keylist::error::KlResult;
use keylist::export::ExportSinks;
use keylist::metrics::{load_metric_store, MetricStore};
use keylist::pipeline::SelectionPipeline;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub config: Config,

    /// Number of ranked candidates to print
    #[arg(short = 't', long, default_value_t = 5)]
    pub top: usize,
}

pub fn run(
    args: SelectArgs,
    config: Config,
    mut key_store: MetricStore,
    keypair_path: &str,
) -> KlResult<()> {
    let pipeline = SelectionPipeline::new(config)?;

    let mut keypair_store = if pipeline.config().selection.include_dual_keys {
        info!("📂 Loading Keypairs: {}", keypair_path);
        load_metric_store(keypair_path)?
    } else {
        MetricStore::new()
    };

    let mut sinks = ExportSinks::from_paths(&pipeline.config().exports);
    let report = pipeline.run(&mut key_store, &mut keypair_store, &mut sinks)?;

    if report.candidates.is_empty() {
        println!("\nNo candidate keylist satisfies the length bounds.");
        return Ok(());
    }

    reports::print_ranking(&report, args.top);
    println!(
        "\nWoohoo, the keylist ({}) has the highest score with {:.2} points!\n",
        report.best.keylist, report.best.score
    );
    Ok(())
}
