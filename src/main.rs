//! Command-line interface for magicgen
//!
//! # Usage Examples
//!
//! ```bash
//! # Preview one record on the console (files_count defaults to 0)
//! magicgen --data-schema '{"number": "int:rand"}'
//!
//! # Write a single file with 1000 lines
//! magicgen ./out --data-schema ./schema.json --files-count 1
//!
//! # Write 25 files named data_00.json .. data_24.json
//! magicgen ./out \
//!   --data-schema '{"date": "timestamp:", "age": "int:rand(1, 90)"}' \
//!   --files-count 25 --file-prefix count \
//!   --clear-path
//! ```

use anyhow::{bail, Context};
use clap::Parser;
use magicgen::config::Config;
use magicgen_core::Schema;
use magicgen_output::{BatchOutcome, BatchWriter, GenerationJob, PrefixStrategy};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "magicgen")]
#[command(about = "Generate test data based on a provided data schema")]
#[command(long_about = None)]
struct Cli {
    /// Directory to save generated files to
    path_to_save_files: Option<PathBuf>,

    /// How many JSON files to generate (0 previews one record on the console)
    #[arg(long)]
    files_count: Option<u64>,

    /// Base file name
    #[arg(long)]
    file_name: Option<String>,

    /// Prefix for file names when more than one file is generated
    #[arg(long, value_enum)]
    file_prefix: Option<PrefixStrategy>,

    /// Inline JSON schema, or a path to a JSON file with the schema
    #[arg(long)]
    data_schema: Option<String>,

    /// Number of lines per generated file
    #[arg(long)]
    data_lines: Option<u64>,

    /// Delete existing files matching <file_name>*.json before generating
    #[arg(long)]
    clear_path: bool,

    /// Path to a TOML file with default values for all parameters
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let defaults = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let job = build_job(cli, defaults)?;

    info!("starting data generation");
    let writer = BatchWriter::new(job)?;
    match writer.run()? {
        BatchOutcome::Preview(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        BatchOutcome::Files(paths) => {
            info!(files = paths.len(), "data generated");
        }
    }
    Ok(())
}

/// Merge CLI flags over config defaults and validate the result. The core
/// only ever sees a fully validated job.
fn build_job(cli: Cli, defaults: Config) -> anyhow::Result<GenerationJob> {
    let output_dir = cli.path_to_save_files.unwrap_or(defaults.path_to_save_files);
    let files_count = cli.files_count.unwrap_or(defaults.files_count);
    let file_name = cli.file_name.unwrap_or(defaults.file_name);
    let file_prefix = cli.file_prefix.unwrap_or(defaults.file_prefix);
    let schema_arg = cli.data_schema.unwrap_or(defaults.data_schema);
    let data_lines = cli.data_lines.unwrap_or(defaults.data_lines);
    let clear_path = cli.clear_path || defaults.clear_path;

    if !output_dir.exists() {
        bail!("path_to_save_files={} does not exist", output_dir.display());
    }
    if !output_dir.is_dir() {
        bail!(
            "path_to_save_files={} is not a directory",
            output_dir.display()
        );
    }
    if file_name.is_empty() {
        bail!("file_name must not be empty");
    }
    if data_lines < 1 {
        bail!("data_lines={data_lines} is not valid; each file needs at least one line");
    }

    let schema = Schema::from_inline_or_file(&schema_arg)
        .with_context(|| format!("failed to load data schema from {schema_arg:?}"))?;

    Ok(GenerationJob {
        schema,
        output_dir,
        file_name,
        files_count,
        data_lines,
        file_prefix,
        clear_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(dir: &std::path::Path) -> Cli {
        Cli {
            path_to_save_files: Some(dir.to_path_buf()),
            files_count: Some(0),
            file_name: None,
            file_prefix: None,
            data_schema: Some(r#"{"number": "int:rand"}"#.to_string()),
            data_lines: None,
            clear_path: false,
            config: None,
        }
    }

    #[test]
    fn test_build_job_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let job = build_job(cli(dir.path()), Config::default()).unwrap();
        assert_eq!(job.files_count, 0);
        assert_eq!(job.file_name, "data");
        assert_eq!(job.data_lines, 1000);
        assert_eq!(job.schema.len(), 1);
    }

    #[test]
    fn test_missing_directory_rejected() {
        let mut args = cli(std::path::Path::new("/nonexistent/dir"));
        args.path_to_save_files = Some(PathBuf::from("/nonexistent/dir"));
        assert!(build_job(args, Config::default()).is_err());
    }

    #[test]
    fn test_file_as_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let mut args = cli(dir.path());
        args.path_to_save_files = Some(file);
        assert!(build_job(args, Config::default()).is_err());
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = cli(dir.path());
        args.file_name = Some(String::new());
        assert!(build_job(args, Config::default()).is_err());
    }

    #[test]
    fn test_zero_data_lines_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = cli(dir.path());
        args.data_lines = Some(0);
        assert!(build_job(args, Config::default()).is_err());
    }

    #[test]
    fn test_bad_schema_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = cli(dir.path());
        args.data_schema = Some(r#"{number: "int:rand"}"#.to_string());
        assert!(build_job(args, Config::default()).is_err());
    }

    #[test]
    fn test_cli_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut defaults = Config::default();
        defaults.files_count = 10;
        defaults.data_lines = 5;

        let mut args = cli(dir.path());
        args.files_count = Some(2);
        args.data_lines = None;

        let job = build_job(args, defaults).unwrap();
        assert_eq!(job.files_count, 2);
        assert_eq!(job.data_lines, 5);
    }
}
