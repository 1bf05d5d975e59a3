//! Command-line front end: substitute global variables into a stylesheet.
//!
//! ```text
//! globvars --vars vars.yaml src/app.css -o dist/app.css
//! globvars --config globvars.json --prefix '--const-' < in.css > out.css
//! globvars --vars vars.yaml --dump-store
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use globvars::{GlobalVars, Options};
use globvars_css::Processor;

/// Substitute global variables into a CSS stylesheet.
#[derive(Debug, Parser)]
#[command(name = "globvars", version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["vars", "config"])))]
struct Cli {
    /// Stylesheet to process. Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Variable tree file (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    vars: Option<PathBuf>,

    /// Options file with `prefix` and `data` keys (.yaml, .yml or .json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reference prefix; overrides the options file.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Output file. Writes stdout when omitted.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the resolved variable store as YAML instead of processing a stylesheet.
    #[arg(long)]
    dump_store: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut options = match (&cli.config, &cli.vars) {
        (Some(path), _) => Options::from_file(path)?,
        (None, Some(path)) => Options::from_data_file(path)?,
        (None, None) => anyhow::bail!("either --vars or --config is required"),
    };
    if let Some(prefix) = cli.prefix {
        options.prefix = Some(prefix);
    }

    let vars = GlobalVars::new(options)?;

    if cli.dump_store {
        let yaml = serde_yaml::to_string(vars.store()).context("failed to serialize store")?;
        return write_output(cli.output.as_deref(), &yaml);
    }

    let (css, processor) = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            let css = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (css, Processor::new(vars).with_file(path))
        }
        _ => {
            let mut css = String::new();
            io::stdin()
                .read_to_string(&mut css)
                .context("failed to read stdin")?;
            (css, Processor::new(vars))
        }
    };

    let output = processor.process(&css)?;
    write_output(cli.output.as_deref(), &output)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(content.as_bytes())
            .context("failed to write stdout"),
    }
}
