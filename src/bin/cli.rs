//! BioNet PCT CLI
//!
//! Syncs a vegetation classification dataset and looks up records by PCTID.

use std::io;
use std::path::PathBuf;

use bionet_pct::{
    error::Result,
    models::{Config, DatasetConfig, DatasetKind},
    pipeline::{self, Stage},
    services::ODataClient,
    storage::LocalStorage,
};
use clap::{Args, Parser, Subcommand};

/// bionet-pct - BioNet vegetation classification dataset sync
#[derive(Parser, Debug)]
#[command(
    name = "bionet-pct",
    version,
    about = "Sync BioNet PCT datasets and look up records by PCTID"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "bionet.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Which dataset to work on, and where its snapshot lives.
#[derive(Args, Debug)]
struct DatasetArgs {
    /// Dataset kind: benchmarks or growth-form
    #[arg(short, long, default_value = "benchmarks")]
    dataset: DatasetKind,

    /// Snapshot file (default: dataset_<kind>.json in the working directory)
    #[arg(long)]
    cache: Option<PathBuf>,
}

impl DatasetArgs {
    fn resolve(&self, config: &Config) -> DatasetConfig {
        let mut dataset = config.dataset(self.dataset);
        if let Some(path) = &self.cache {
            dataset.cache_path = path.clone();
        }
        dataset
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the dataset, update the snapshot if it changed, then look up a PCTID
    Sync {
        #[command(flatten)]
        target: DatasetArgs,

        /// Override the remote entity set name
        #[arg(long)]
        entity_set: Option<String>,
    },

    /// Look up a PCTID in the stored snapshot (no network access)
    Lookup {
        #[command(flatten)]
        target: DatasetArgs,

        /// Identifier to search for
        #[arg(long, allow_negative_numbers = true)]
        pctid: i64,
    },

    /// Show current snapshot info
    Info {
        #[command(flatten)]
        target: DatasetArgs,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Service root: {}", config.service.base_url);

    match cli.command {
        Command::Sync { target, entity_set } => {
            let mut dataset = target.resolve(&config);
            if let Some(name) = entity_set {
                dataset.entity_set = name;
            }

            // Failures are reported on stdout, the process still exits normally.
            let client = match ODataClient::new(&config.service) {
                Ok(client) => client,
                Err(e) => {
                    println!("{}", e.user_message());
                    return Ok(());
                }
            };
            let storage = LocalStorage::new(&dataset.cache_path);

            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            let stage =
                pipeline::run(&client, &storage, &dataset, &mut input, &mut output).await;

            if stage == Stage::Failed {
                log::warn!("Sync of {} did not complete", dataset.kind);
            }
        }

        Command::Lookup { target, pctid } => {
            let dataset = target.resolve(&config);
            let storage = LocalStorage::new(&dataset.cache_path);
            println!("{}", pipeline::lookup_snapshot(&storage, pctid).await);
        }

        Command::Info { target } => {
            let dataset = target.resolve(&config);
            let storage = LocalStorage::new(&dataset.cache_path);
            let info = pipeline::snapshot_info(&storage, &dataset).await;

            println!("Dataset: {} ({})", dataset.kind, dataset.kind.label());
            for (key, value) in info.rows() {
                println!("    {}: {}", key, value);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            for kind in DatasetKind::ALL {
                let dataset = config.dataset(kind);
                log::info!(
                    "✓ {}: {} -> {}",
                    kind,
                    dataset.entity_set,
                    dataset.cache_path.display()
                );
            }

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
