use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use a2o_core::apidoc;
use a2o_core::config::{self, A2oConfig, CONFIG_FILE_NAME};
use a2o_core::openapi::Document;
use a2o_core::{convert, to_output_json};

#[derive(Parser)]
#[command(name = "a2o", about = "apidoc-to-OpenAPI 3.0 converter", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert extracted apidoc JSON into an OpenAPI document
    Convert {
        /// Path to the extractor's record list (api_data.json)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Path to the extractor's project metadata (api_project.json)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output directory for swagger.json
        #[arg(long)]
        dest: Option<PathBuf>,

        /// Log what would be written without touching the filesystem
        #[arg(long)]
        simulate: bool,
    },

    /// Summarize the document a conversion would produce
    Inspect {
        /// Path to the extractor's record list
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Path to the extractor's project metadata
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new a2o configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            data,
            project,
            dest,
            simulate,
        } => {
            let cfg = try_load_config()?.unwrap_or_default();
            let data = data.unwrap_or_else(|| PathBuf::from(&cfg.data));
            let project = project.unwrap_or_else(|| PathBuf::from(&cfg.project));
            let dest = dest.unwrap_or_else(|| PathBuf::from(&cfg.dest));
            cmd_convert(&data, &project, &dest, simulate)
        }

        Commands::Inspect {
            data,
            project,
            format,
        } => {
            let cfg = try_load_config()?.unwrap_or_default();
            let data = data.unwrap_or_else(|| PathBuf::from(&cfg.data));
            let project = project.unwrap_or_else(|| PathBuf::from(&cfg.project));
            cmd_inspect(&data, &project, format)
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "a2o", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<A2oConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Load both extractor files and run the conversion.
fn load_document(data: &Path, project: &Path) -> Result<Document> {
    let records = fs::read_to_string(data)
        .with_context(|| format!("failed to read {}", data.display()))?;
    let records = apidoc::records_from_json(&records)
        .with_context(|| format!("failed to parse {}", data.display()))?;

    let metadata = fs::read_to_string(project)
        .with_context(|| format!("failed to read {}", project.display()))?;
    let metadata = apidoc::project_from_json(&metadata)
        .with_context(|| format!("failed to parse {}", project.display()))?;

    Ok(convert(&records, &metadata))
}

fn cmd_convert(data: &Path, project: &Path, dest: &Path, simulate: bool) -> Result<()> {
    let document = load_document(data, project)?;
    let output = to_output_json(&document)?;

    if simulate {
        log::warn!("simulation: no file or directory will be created");
        eprintln!(
            "Would write {} ({} paths, {} bytes)",
            dest.join("swagger.json").display(),
            document.paths.len(),
            output.len()
        );
        return Ok(());
    }

    fs::create_dir_all(dest)
        .with_context(|| format!("failed to create output directory {}", dest.display()))?;

    let out_path = dest.join("swagger.json");
    fs::write(&out_path, &output)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    eprintln!("  wrote {}", out_path.display());

    eprintln!(
        "Converted {} paths from {}",
        document.paths.len(),
        data.display()
    );
    Ok(())
}

fn cmd_inspect(data: &Path, project: &Path, format: InspectFormat) -> Result<()> {
    let document = load_document(data, project)?;
    let summary = build_inspect_summary(&document);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(document: &Document) -> serde_json::Value {
    let paths: Vec<serde_json::Value> = document
        .paths
        .iter()
        .map(|(url, operations)| {
            serde_json::json!({
                "path": url,
                "methods": operations.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    let operation_count: usize = document.paths.values().map(|ops| ops.len()).sum();

    serde_json::json!({
        "info": {
            "title": document.info.title,
            "version": document.info.version,
        },
        "paths": paths,
        "operations": operation_count,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[{"type": "get", "url": "/ping", "group": "System", "name": "ping"}]"#;
    const PROJECT: &str = r#"{"name": "ping-api", "version": "0.1.0"}"#;

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let data = dir.join("api_data.json");
        let project = dir.join("api_project.json");
        fs::write(&data, DATA).unwrap();
        fs::write(&project, PROJECT).unwrap();
        (data, project)
    }

    #[test]
    fn convert_writes_swagger_json() {
        let tmp = tempfile::tempdir().unwrap();
        let (data, project) = write_inputs(tmp.path());
        let dest = tmp.path().join("out");

        cmd_convert(&data, &project, &dest, false).unwrap();

        let written = fs::read_to_string(dest.join("swagger.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["openapi"], "3.0.0");
        assert_eq!(value["info"]["title"], "ping-api");
        assert!(value["paths"]["/ping"]["get"].is_object());
    }

    #[test]
    fn simulate_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let (data, project) = write_inputs(tmp.path());
        let dest = tmp.path().join("out");

        cmd_convert(&data, &project, &dest, true).unwrap();
        assert!(!dest.exists());
    }

    #[test]
    fn inspect_summary_shape() {
        let records = apidoc::records_from_json(DATA).unwrap();
        let project = apidoc::project_from_json(PROJECT).unwrap();
        let summary = build_inspect_summary(&convert(&records, &project));
        assert_eq!(summary["operations"], 1);
        assert_eq!(summary["paths"][0]["path"], "/ping");
        assert_eq!(summary["paths"][0]["methods"][0], "get");
    }
}
