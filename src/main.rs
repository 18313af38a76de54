mod debug_report;

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use stencil::{Declaration, EngineConfig, Generator, Output};

/// Generate partial-class sources from marked declarations.
#[derive(Debug, Parser)]
#[command(name = "stencil", version)]
struct Cli {
    /// JSON file holding an array of declarations. Reads stdin when omitted.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// TOML engine configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write every generated document into this directory.
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, overrides_with = "color")]
    no_color: bool,

    /// Log pipeline decisions at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

/// Exit codes:
/// 0 success, 1 internal error, 2 invalid input, 3 error diagnostics.
enum Failure {
    Invalid(anyhow::Error),
    Internal(anyhow::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) if output.has_errors() => ExitCode::from(3),
        Ok(_) => ExitCode::SUCCESS,
        Err(Failure::Invalid(err)) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
        Err(Failure::Internal(err)) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<Output, Failure> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path).map_err(|e| Failure::Invalid(e.into()))?,
        None => EngineConfig::default(),
    };

    let (label, text) = read_input(cli.input.as_deref()).map_err(Failure::Invalid)?;
    let declarations: Vec<Declaration> = serde_json::from_str(&text)
        .with_context(|| format!("{label} is not a JSON array of declarations"))
        .map_err(Failure::Invalid)?;
    log::debug!("read {} declarations from {label}", declarations.len());

    let mut generator = Generator::new(config).context("failed to build the rule registry").map_err(Failure::Internal)?;
    let output = generator.run(&declarations);

    let color = if cli.color {
        true
    } else if cli.no_color {
        false
    } else {
        io::stdout().is_terminal()
    };
    debug_report::print_run(&label, &output, color);

    if let Some(dir) = &cli.out {
        write_documents(dir, &output).map_err(Failure::Internal)?;
    }

    Ok(output)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
            if text.trim().is_empty() {
                anyhow::bail!("no input provided (pass a file or pipe JSON on stdin)");
            }
            Ok(("<stdin>".to_string(), text))
        }
    }
}

fn write_documents(dir: &Path, output: &Output) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    for doc in &output.documents {
        let path = dir.join(&doc.output_id);
        fs::write(&path, &doc.text).with_context(|| format!("failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}
