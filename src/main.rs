use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use keylist::config::ScoringWeights;
use keylist::metrics::load_metric_store;
use std::process;
use std::time::Instant;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword list selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Keyword input data
    #[arg(global = true, long, default_value = "in_sample_key_metrics.csv")]
    key_data: String,

    /// Key pair data for dual key permutation search phrase computation
    #[arg(global = true, long, default_value = "in_sample_keypair_metrics.csv")]
    keypair_data: String,

    /// JSON weights profile, explicit weight flags override its values
    #[arg(global = true, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select the highest scoring keylist
    Select(cmd::select::SelectArgs),
    /// List candidate keylists only
    Combos(cmd::combos::CombosArgs),
    /// Show individual keyword scores
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let start_time = Instant::now();

    let mut config = match &cli.command {
        Commands::Select(args) => args.config.clone(),
        Commands::Combos(args) => args.config.clone(),
        Commands::Score(args) => args.config.clone(),
    };

    if let Some(path) = &cli.weights {
        info!("⚖️  Loading Weights from: {}", path);
        let mut file_weights = ScoringWeights::load_from_file(path).unwrap_or_else(|e| {
            error!("❌ Failed to load weights file '{}': {}", path, e);
            process::exit(1);
        });
        if let Some((_, sub_matches)) = matches.subcommand() {
            file_weights.merge_from_cli(&config.weights, sub_matches);
        }
        config.weights = file_weights;
    }

    info!("📂 Loading Keywords: {}", cli.key_data);
    let key_store = load_metric_store(&cli.key_data).unwrap_or_else(|e| {
        error!("❌ Invalid keyword data: {}", e);
        process::exit(1);
    });

    if key_store.is_empty() {
        error!("Error: Please check input file and keywords.");
        process::exit(1);
    }

    let result = match cli.command {
        Commands::Select(args) => cmd::select::run(args, config, key_store, &cli.keypair_data),
        Commands::Combos(args) => cmd::combos::run(args, config, key_store),
        Commands::Score(args) => cmd::score::run(args, config, key_store),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }

    info!(
        "Elapsed time: {:.3} seconds",
        start_time.elapsed().as_secs_f64()
    );
}
