//! Command-line interface for igata.

use clap::{ArgAction, Parser};
use colored::Colorize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::report::FORMATTER_NAMES;
use crate::Igata;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

/// Generate test skeletons from a Ruby class or module.
///
/// Igata reads a class definition, finds its fully-qualified name and its
/// methods, and writes one test stub per method annotated with the branches
/// and comparisons found in the method body.
#[derive(Parser, Debug)]
#[command(name = "igata")]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Ruby source file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Output style: minitest, rspec, or json
    #[arg(short, long)]
    pub formatter: Option<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Omit branch and comparison comments from the stubs
    #[arg(long)]
    pub no_annotations: bool,

    /// Log analysis details to stderr
    #[arg(long)]
    pub verbose: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Load the explicit config, a discovered one, or the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };
    match path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            Config::parse_file(&p)
                .map_err(|e| anyhow::anyhow!("cannot load config {}: {}", p.display(), e))
        }
        None => Ok(Config::default()),
    }
}

/// Read the source file, or stdin when no file was given.
fn read_source(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e)),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Run the generator. Returns the process exit code.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    let config = load_config(args.config.as_deref())?;

    let formatter = args
        .formatter
        .as_deref()
        .unwrap_or_else(|| config.formatter_name());
    if !FORMATTER_NAMES.contains(&formatter) {
        eprintln!(
            "{} invalid formatter {:?}, must be one of: {}",
            "Error:".red().bold(),
            formatter,
            FORMATTER_NAMES.join(", ")
        );
        return Ok(EXIT_ERROR);
    }
    let annotate = config.should_annotate() && !args.no_annotations;

    let source = read_source(args.file.as_deref())?;
    let igata = Igata::new(&source)?;
    let output = igata.generate_with(formatter, annotate)?;

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && parent != Path::new(".") {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, output)?;
            debug!(path = %path.display(), "wrote output");
        }
        None => print!("{}", output),
    }

    Ok(EXIT_SUCCESS)
}
