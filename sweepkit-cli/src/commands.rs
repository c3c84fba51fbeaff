//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use crate::TrainerInputs;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use sweepkit_core::{
    ColumnInformation, Hyperparams, PipelineNode, SweepkitConfig, TaskKind, TrainerCatalog,
};

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load(workspace, config_path)?;
    let catalog = TrainerCatalog::with_defaults();

    match command {
        Commands::List { task } => handle_list(&catalog, &config, task),
        Commands::Ranges { trainer } => {
            let ext = catalog.get(trainer)?;
            print_json(&ext.hyperparam_sweep_ranges())
        }
        Commands::Node { trainer, inputs } => {
            let ext = catalog.get(trainer)?;
            let (params, columns) = resolve_inputs(&config, inputs)?;
            let node = ext
                .create_pipeline_node(&params, &columns)
                .with_context(|| format!("Failed to build pipeline node for {trainer}"))?;
            print_json(&node)
        }
        Commands::Instance { trainer, inputs } => {
            let ext = catalog.get(trainer)?;
            let (params, columns) = resolve_inputs(&config, inputs)?;
            let estimator = ext
                .create_instance(&config.context.trainer_context(), &params, &columns)
                .with_context(|| format!("Failed to build estimator for {trainer}"))?;
            print_json(&estimator)
        }
        Commands::Rebuild { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let node: PipelineNode = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a pipeline node", file.display()))?;
            let estimator = catalog
                .estimator_from_node(&config.context.trainer_context(), &node)
                .with_context(|| format!("Failed to rebuild estimator for '{}'", node.name))?;
            print_json(&estimator)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let toml_str = toml::to_string_pretty(&config)?;
                println!("{}", config_source(workspace, config_path));
                println!("{}", toml_str);
                Ok(())
            }
        },
    }
}

fn load(workspace: &Path, config_path: Option<&Path>) -> anyhow::Result<SweepkitConfig> {
    let config = match config_path {
        Some(path) => sweepkit_core::load_config_file(path),
        None => sweepkit_core::load_config(Some(workspace), None),
    };
    config.context("Failed to load config")
}

/// Comment line naming where `config show` got its values.
fn config_source(workspace: &Path, config_path: Option<&Path>) -> String {
    match config_path {
        Some(path) => format!("# Loaded from {}", path.display()),
        None if sweepkit_core::config_exists(Some(workspace)) => {
            "# Layered from user and workspace configuration files".to_string()
        }
        None => "# No configuration file found; showing built-in defaults".to_string(),
    }
}

fn handle_list(
    catalog: &TrainerCatalog,
    config: &SweepkitConfig,
    task: Option<TaskKind>,
) -> anyhow::Result<()> {
    let tasks = match task {
        Some(task) => vec![task],
        None => vec![TaskKind::Binary, TaskKind::Multiclass],
    };
    for task in tasks {
        let extensions = catalog.extensions_for(task, &config.catalog);
        println!("{:?} trainers ({}):", task, extensions.len());
        for ext in extensions {
            let weight = if ext.supports_example_weight() {
                "weighted"
            } else {
                "unweighted"
            };
            println!(
                "  {:<38} {:>2} params  {}",
                TrainerCatalog::trainer_name(ext.as_ref()),
                ext.hyperparam_sweep_ranges().len(),
                weight
            );
        }
    }
    Ok(())
}

/// Merge command-line inputs over configured column defaults.
fn resolve_inputs(
    config: &SweepkitConfig,
    inputs: TrainerInputs,
) -> anyhow::Result<(Hyperparams, ColumnInformation)> {
    let params = Hyperparams::from_pairs(inputs.params)?;
    let mut columns = config.columns.column_information();
    if let Some(label) = inputs.label {
        columns.label_column = label;
    }
    if let Some(weight) = inputs.weight {
        columns.example_weight_column = Some(weight);
    }
    Ok((params, columns))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sweepkit_core::{ParamValue, TrainerName, WeightColumnPolicy};

    #[test]
    fn test_resolve_inputs_overrides_defaults() {
        let mut config = SweepkitConfig::default();
        config.columns.example_weight_column = Some("W".into());
        let inputs = TrainerInputs {
            params: vec![("NumberOfTrees".into(), ParamValue::Int(20))],
            label: Some("Target".into()),
            weight: None,
        };
        let (params, columns) = resolve_inputs(&config, inputs).unwrap();
        assert_eq!(params.get("NumberOfTrees"), Some(&ParamValue::Int(20)));
        assert_eq!(columns.label_column, "Target");
        assert_eq!(columns.example_weight_column.as_deref(), Some("W"));
    }

    #[test]
    fn test_resolve_inputs_rejects_duplicates() {
        let inputs = TrainerInputs {
            params: vec![
                ("Shuffle".into(), ParamValue::Bool(true)),
                ("Shuffle".into(), ParamValue::Bool(false)),
            ],
            ..TrainerInputs::default()
        };
        assert!(resolve_inputs(&SweepkitConfig::default(), inputs).is_err());
    }

    #[test]
    fn test_load_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweepkit.toml");
        std::fs::write(&path, "[context]\nweight_policy = \"reject\"\n").unwrap();
        let config = load(dir.path(), Some(&path)).unwrap();
        assert_eq!(config.context.weight_policy, WeightColumnPolicy::Reject);
    }

    #[test]
    fn test_config_source_names_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweepkit.toml");
        let note = config_source(dir.path(), Some(&path));
        assert_eq!(note, format!("# Loaded from {}", path.display()));
    }

    #[test]
    fn test_config_source_detects_workspace_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".sweepkit")).unwrap();
        std::fs::write(dir.path().join(".sweepkit/config.toml"), "").unwrap();
        assert!(config_source(dir.path(), None).contains("Layered"));
    }

    #[test]
    fn test_config_show_with_workspace_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".sweepkit")).unwrap();
        std::fs::write(
            dir.path().join(".sweepkit/config.toml"),
            "[columns]\nlabel_column = \"Target\"\n",
        )
        .unwrap();
        let action = ConfigAction::Show;
        handle_command(Commands::Config { action }, dir.path(), None).unwrap();
    }

    #[test]
    fn test_rebuild_from_saved_node() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TrainerCatalog::with_defaults();
        let ext = catalog.get(TrainerName::SgdCalibratedOva).unwrap();
        let params = Hyperparams::new().with("NumberOfIterations", 20i64);
        let node = ext
            .create_pipeline_node(&params, &ColumnInformation::default())
            .unwrap();
        let path = dir.path().join("node.json");
        std::fs::write(&path, serde_json::to_string(&node).unwrap()).unwrap();

        handle_command(Commands::Rebuild { file: path }, dir.path(), None).unwrap();
    }
}
