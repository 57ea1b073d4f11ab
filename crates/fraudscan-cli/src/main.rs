use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use log::LevelFilter;

use fraudscan_cli::cli::build_cli;
use fraudscan_cli::run::input::RunConfig;
use fraudscan_cli::run::runner;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("FRAUDSCAN_LOG", "error,fraudscan=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => handle_run(run_matches),
        Some(("config", _)) => {
            let default_json = serde_json::to_string_pretty(&RunConfig::default())?;
            println!("{}", default_json);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_run(matches: &ArgMatches) -> Result<()> {
    let config_path = matches.get_one::<PathBuf>("config");
    match config_path {
        Some(path) => log::info!("[fraudscan] Running with config: {:?}", path),
        None => log::info!("[fraudscan] No config provided; using defaults."),
    }

    let config = RunConfig::from_arguments(config_path.map(PathBuf::as_path), matches)?;

    match runner::run_to_stdout(&config) {
        Ok(summary) => {
            log::info!(
                "[fraudscan] Test accuracy {:.1}% on {} samples",
                summary.evaluation.accuracy,
                summary.n_test
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Run failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
