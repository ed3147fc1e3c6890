#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line for justice graph backlog estimates.
//!
//! ```text
//! justice_graph_cli estimate --state Kerala --district Ernakulam --case-type Civil [--json]
//! justice_graph_cli jurisdictions [--state Kerala]
//! justice_graph_cli serve [--bind-addr 0.0.0.0] [--port 8080]
//! ```
//!
//! Running with no subcommand enters interactive mode, which walks the
//! user through picking a state, district, and case type from the dataset.

mod interactive;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use justice_graph_backlog::{
    BacklogEstimate, BacklogEstimator, BacklogQuery, DEFAULT_DATA_PATH, DatasetIndex, LoadError,
    match_key,
};
use justice_graph_server::{DATA_PATH_ENV, ServerConfig};

#[derive(Parser)]
#[command(
    name = "justice_graph_cli",
    about = "Estimate pending-case backlog duration from historical court data"
)]
struct Cli {
    /// Path to the pending-cases CSV
    #[arg(long, global = true, env = DATA_PATH_ENV, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate backlog duration for one jurisdiction and case type
    Estimate {
        /// State name
        #[arg(long)]
        state: String,
        /// District name
        #[arg(long)]
        district: String,
        /// Case type
        #[arg(long)]
        case_type: String,
        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the jurisdictions and case types present in the dataset
    Jurisdictions {
        /// Only list jurisdictions in this state
        #[arg(long)]
        state: Option<String>,
    },
    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1")]
        bind_addr: String,
        /// Port to bind
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,
    },
}

/// Formats an estimate for terminal output.
fn format_estimate(estimate: &BacklogEstimate) -> String {
    format!(
        "Estimated duration: {:.1} days ({:.1} years)\nConfidence: {}\n{}\n",
        estimate.estimated_duration_days,
        estimate.estimated_duration_years,
        estimate.confidence,
        estimate.explanation
    )
}

fn load_index(path: &Path) -> Result<DatasetIndex, LoadError> {
    log::debug!("Reading dataset from {}", path.display());
    let index = DatasetIndex::load(path)?;
    log::debug!("Dataset has {} rows", index.len());
    Ok(index)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let index = load_index(&cli.data)?;
        return interactive::run(index);
    };

    match command {
        Commands::Estimate {
            state,
            district,
            case_type,
            json,
        } => {
            let index = load_index(&cli.data)?;
            let estimator = BacklogEstimator::new(Arc::new(index));
            log::info!("Estimating {state}/{district} ({case_type})");
            let estimate = estimator.estimate(&BacklogQuery::new(state, district, case_type));

            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                print!("{}", format_estimate(&estimate));
            }
        }
        Commands::Jurisdictions { state } => {
            let index = load_index(&cli.data)?;
            let wanted = state.as_deref().map(match_key);

            let jurisdictions: Vec<_> = index
                .jurisdictions()
                .into_iter()
                .filter(|j| wanted.as_ref().is_none_or(|w| match_key(&j.state) == *w))
                .collect();

            if jurisdictions.is_empty() {
                println!("No jurisdictions found.");
                return Ok(());
            }

            println!("{:<24} {:<28} CASE TYPE", "STATE", "DISTRICT");
            println!("{}", "-".repeat(72));
            for j in &jurisdictions {
                println!("{:<24} {:<28} {}", j.state, j.district, j.case_type);
            }
            println!("\n{} jurisdiction(s)", jurisdictions.len());
        }
        Commands::Serve { bind_addr, port } => {
            let config = ServerConfig {
                data_path: cli.data,
                bind_addr,
                port,
            };
            actix_web::rt::System::new().block_on(justice_graph_server::run_server(config))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use justice_graph_backlog::Confidence;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_estimate_command() {
        let cli = Cli::try_parse_from([
            "justice_graph_cli",
            "estimate",
            "--state",
            "Kerala",
            "--district",
            "Ernakulam",
            "--case-type",
            "Civil",
            "--data",
            "/tmp/data.csv",
        ])
        .unwrap();

        assert_eq!(cli.data, PathBuf::from("/tmp/data.csv"));
        let Some(Commands::Estimate {
            state,
            district,
            case_type,
            json,
        }) = cli.command
        else {
            panic!("expected estimate command");
        };
        assert_eq!(state, "Kerala");
        assert_eq!(district, "Ernakulam");
        assert_eq!(case_type, "Civil");
        assert!(!json);
    }

    #[test]
    fn formats_estimate() {
        let text = format_estimate(&BacklogEstimate {
            estimated_duration_days: 455.0,
            estimated_duration_years: 1.2,
            confidence: Confidence::Medium,
            explanation: "Based on 100 cases.".to_string(),
        });
        assert_eq!(
            text,
            "Estimated duration: 455.0 days (1.2 years)\nConfidence: Medium\nBased on 100 cases.\n"
        );
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let path = std::env::temp_dir().join("justice_graph_cli_missing_dataset.csv");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(load_index(&path), Err(LoadError::NotFound { .. })));
    }
}
