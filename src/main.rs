use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sedna_config::PipelineDef;
use sedna_pipeline::Pipeline;

/// Sedna - lazy artifact resolution for processing pipelines
#[derive(Parser)]
#[command(name = "sedna")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate a pipeline file and print a summary
  Validate {
    /// Path to the pipeline file (JSON)
    pipeline_file: PathBuf,
  },

  /// List the modes of a pipeline
  Modes {
    /// Path to the pipeline file (JSON)
    pipeline_file: PathBuf,
  },

  /// Print the JSON descriptor of a pipeline or one of its modes
  Describe {
    /// Path to the pipeline file (JSON)
    pipeline_file: PathBuf,

    /// Only describe this mode
    #[arg(long)]
    mode: Option<String>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Validate { pipeline_file }) => {
      let pipeline = load_pipeline(&pipeline_file)?;
      println!("{}", summarize(&pipeline));
    }
    Some(Commands::Modes { pipeline_file }) => {
      let pipeline = load_pipeline(&pipeline_file)?;
      for mode in pipeline.modes() {
        if mode.purpose().is_empty() {
          println!("{}", mode.name());
        } else {
          println!("{}\t{}", mode.name(), mode.purpose());
        }
      }
    }
    Some(Commands::Describe {
      pipeline_file,
      mode,
    }) => {
      let pipeline = load_pipeline(&pipeline_file)?;
      println!("{}", describe(&pipeline, mode.as_deref())?);
    }
    None => {
      println!("sedna - use --help to see available commands");
    }
  }

  Ok(())
}

/// Read, parse and validate a pipeline file.
fn load_pipeline(path: &Path) -> Result<Pipeline> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read pipeline file: {}", path.display()))?;

  let def: PipelineDef = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse pipeline file: {}", path.display()))?;

  let pipeline = sedna_pipeline::validate(def)
    .with_context(|| format!("invalid pipeline: {}", path.display()))?;

  info!(pipeline = %pipeline.name(), path = %path.display(), "pipeline_loaded");
  Ok(pipeline)
}

fn summarize(pipeline: &Pipeline) -> String {
  use sedna_pipeline::ArtifactClass;

  format!(
    "{}: {} inputs, {} intermediates, {} outputs, {} modes",
    pipeline.name(),
    pipeline.artifacts_of(ArtifactClass::Input).count(),
    pipeline.artifacts_of(ArtifactClass::Intermediate).count(),
    pipeline.artifacts_of(ArtifactClass::Output).count(),
    pipeline.modes().count(),
  )
}

fn describe(pipeline: &Pipeline, mode: Option<&str>) -> Result<String> {
  let json = match mode {
    Some(name) => {
      let mode = pipeline
        .mode(name)
        .with_context(|| format!("mode '{}' not found in pipeline", name))?;
      serde_json::to_string_pretty(&pipeline.describe(mode))?
    }
    None => serde_json::to_string_pretty(&pipeline.descriptor())?,
  };
  Ok(json)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  const PIPELINE: &str = r#"{
    "name": "demo",
    "inputs": ["raw_a", "raw_b"],
    "intermediates": ["calibrated"],
    "outputs": ["product"],
    "derivations": {
      "calibrated": { "raw": ["raw_a", "raw_b"] },
      "product": { "cal": ["calibrated"] }
    },
    "modes": [
      {
        "name": "PRODUCT",
        "purpose": "Product from B",
        "inputs": [{ "option_id": "in_b", "artifact": "raw_b" }],
        "outputs": [{ "option_id": "out", "artifact": "product", "file_suffix": "_p" }]
      }
    ]
  }"#;

  fn make_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_load_and_summarize() {
    let file = make_file(PIPELINE);
    let pipeline = load_pipeline(file.path()).unwrap();

    assert_eq!(
      summarize(&pipeline),
      "demo: 2 inputs, 1 intermediates, 1 outputs, 1 modes"
    );
  }

  #[test]
  fn test_load_reports_parse_error() {
    let file = make_file("{ not json");
    let err = load_pipeline(file.path()).unwrap_err();

    assert!(err.to_string().starts_with("failed to parse pipeline file"));
  }

  #[test]
  fn test_load_reports_validation_error() {
    let file = make_file(&PIPELINE.replace(r#""cal": ["calibrated"]"#, r#""cal": ["ghost"]"#));
    let err = load_pipeline(file.path()).unwrap_err();

    assert!(err.to_string().starts_with("invalid pipeline"));
    assert!(format!("{err:#}").contains("ghost"));
  }

  #[test]
  fn test_describe_mode() {
    let file = make_file(PIPELINE);
    let pipeline = load_pipeline(file.path()).unwrap();

    let json: serde_json::Value =
      serde_json::from_str(&describe(&pipeline, Some("PRODUCT")).unwrap()).unwrap();
    assert_eq!(json["name"], "PRODUCT");
    assert_eq!(json["outputs"][0]["sources"][0], "in_b");
    assert!(describe(&pipeline, Some("NOPE")).is_err());
  }
}
