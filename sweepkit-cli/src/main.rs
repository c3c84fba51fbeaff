//! sweepkit CLI: inspect the trainer catalog from the terminal.
//!
//! Lists trainers, prints their sweep ranges, and builds estimators or
//! pipeline nodes from hyperparameter assignments given on the command line.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use sweepkit_core::{ParamValue, TaskKind, TrainerName};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// sweepkit: trainer extensions for hyperparameter search
#[derive(Parser, Debug)]
#[command(name = "sweepkit", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Configuration file path (replaces the layered lookup)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List registered trainers
    List {
        /// Only trainers for this task (binary, multiclass)
        #[arg(short, long)]
        task: Option<TaskKind>,
    },
    /// Print a trainer's hyperparameter sweep ranges
    Ranges {
        /// Trainer name (e.g., FastTreeOva)
        trainer: TrainerName,
    },
    /// Build the pipeline node describing a configured trainer
    Node {
        trainer: TrainerName,
        #[command(flatten)]
        inputs: TrainerInputs,
    },
    /// Build the estimator a trainer produces for an assignment
    Instance {
        trainer: TrainerName,
        #[command(flatten)]
        inputs: TrainerInputs,
    },
    /// Rebuild an estimator from a pipeline node saved as JSON
    Rebuild {
        /// Path to the node JSON file
        file: PathBuf,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Hyperparameter assignment and column roles shared by `node` and `instance`.
#[derive(clap::Args, Debug, Clone, Default)]
struct TrainerInputs {
    /// Hyperparameter assignment, repeatable (e.g., -p NumberOfTrees=100)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, ParamValue)>,

    /// Label column (defaults to the configured label)
    #[arg(long)]
    label: Option<String>,

    /// Example weight column
    #[arg(long)]
    weight: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
}

/// Parse `NAME=VALUE`; the value is read as bool, integer, float, `auto`, or text.
fn parse_param(raw: &str) -> Result<(String, ParamValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing hyperparameter name in '{raw}'"));
    }
    Ok((name.to_string(), ParamValue::parse(value)))
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "sweepkit", "sweepkit")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "sweepkit.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace, cli.config.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_param_literals() {
        assert_eq!(
            parse_param("NumberOfTrees=100").unwrap(),
            ("NumberOfTrees".to_string(), ParamValue::Int(100))
        );
        assert_eq!(
            parse_param("Shuffle=false").unwrap().1,
            ParamValue::Bool(false)
        );
        assert_eq!(
            parse_param("L1Regularization=auto").unwrap().1,
            ParamValue::Auto
        );
        assert_eq!(
            parse_param("LossFunction=HingeLoss").unwrap().1,
            ParamValue::Text("HingeLoss".into())
        );
    }

    #[test]
    fn test_parse_param_rejects_malformed() {
        assert!(parse_param("NumberOfTrees").is_err());
        assert!(parse_param("=5").is_err());
    }

    #[test]
    fn test_cli_node_command() {
        let cli = Cli::try_parse_from([
            "sweepkit",
            "node",
            "fasttreeova",
            "-p",
            "NumberOfTrees=20",
            "--param",
            "LearningRate=0.1",
            "--weight",
            "Weight",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Node { trainer, inputs } => {
                assert_eq!(trainer, TrainerName::FastTreeOva);
                assert_eq!(inputs.params.len(), 2);
                assert_eq!(inputs.label, None);
                assert_eq!(inputs.weight.as_deref(), Some("Weight"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_list_task_filter() {
        let cli = Cli::try_parse_from(["sweepkit", "list", "--task", "multiclass"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                task: Some(TaskKind::Multiclass)
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_trainer() {
        assert!(Cli::try_parse_from(["sweepkit", "ranges", "Perceptron"]).is_err());
    }
}
