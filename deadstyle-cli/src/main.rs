//! deadstyle CLI - find unused CSS selectors across a set of pages.
//!
//! Thin wrapper around deadstyle-core: merges `deadstyle.toml` with command
//! line flags (flags win), runs the elimination engine, and prints the
//! surviving selectors to stdout. Progress goes to stderr via tracing.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};

use deadstyle_core::{
    gather_css_files, init_cli_logging, load_config, print_json, print_plain, run, FetchMode,
    PageDescriptor, RunConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find unused CSS selectors across a set of pages")]
struct Cli {
    /// Root prefix for non-absolute locations (URL or directory)
    #[arg(long)]
    root: Option<String>,

    /// Stylesheet location, fetched in order (repeatable)
    #[arg(short = 's', long = "stylesheet", value_name = "LOCATION")]
    stylesheets: Vec<String>,

    /// Page location to analyze, in order (repeatable)
    #[arg(short = 'p', long = "page", value_name = "LOCATION")]
    pages: Vec<String>,

    /// Inline CSS rule block appended after all stylesheets
    #[arg(long, value_name = "CSS")]
    rules: Option<String>,

    /// Selectors matching this regex are never considered
    #[arg(long, value_name = "PATTERN")]
    ignore: Option<String>,

    /// Retrieve pages through the stateful browsing agent
    #[arg(long)]
    agent: bool,

    /// Discover .css files under the root directory instead of listing them
    #[arg(long)]
    scan: bool,

    /// Directory searched for deadstyle.toml
    #[arg(long, default_value = ".", value_name = "DIR")]
    config_dir: String,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Write the unused selector list to a file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<String>,

    /// Exit with status 1 when unused selectors remain
    #[arg(long)]
    fail_on_unused: bool,
}

fn main() -> Result<()> {
    init_cli_logging();

    let cli = Cli::parse();

    let file_config = load_config(Path::new(&cli.config_dir))?;
    let file_format = file_config
        .as_ref()
        .and_then(|c| c.output.as_ref())
        .and_then(|o| o.format.clone());

    let mut config = match file_config {
        Some(file) => file.into_run_config()?,
        None => RunConfig::default(),
    };

    // Command line flags override file values.
    if let Some(root) = cli.root {
        config.root = root;
    }
    if !cli.stylesheets.is_empty() {
        config.stylesheets = cli.stylesheets.clone();
    }
    if !cli.pages.is_empty() {
        config.pages = cli
            .pages
            .iter()
            .cloned()
            .map(PageDescriptor::Location)
            .collect();
    }
    if let Some(rules) = cli.rules {
        config.rules = rules;
    }
    if let Some(pattern) = &cli.ignore {
        config = config.with_ignore_pattern(pattern)?;
    }
    if cli.agent {
        config.mode = FetchMode::Agent;
    }

    if cli.scan {
        ensure!(
            !config.root.starts_with("http://") && !config.root.starts_with("https://"),
            "--scan walks a directory; the root is a URL: {}",
            config.root
        );
        let discovered = gather_css_files(Path::new(&config.root))?;
        ensure!(
            !discovered.is_empty(),
            "no .css files found under {}",
            config.root
        );
        config
            .stylesheets
            .extend(discovered.iter().map(|p| format!("/{}", p.display())));
    }

    ensure!(
        !config.stylesheets.is_empty() || !config.rules.is_empty(),
        "nothing to analyze: pass --stylesheet, --rules, or --scan"
    );

    let report = run(config)?;

    match &cli.output {
        Some(path) => {
            let mut file = File::create(PathBuf::from(path))
                .with_context(|| format!("Failed to create output file {}", path))?;
            report
                .dump(&mut file)
                .with_context(|| format!("Failed to write {}", path))?;
        }
        None => {
            if cli.json || file_format.as_deref() == Some("json") {
                print_json(&report);
            } else {
                print_plain(&report);
            }
        }
    }

    if cli.fail_on_unused && report.has_unused() {
        std::process::exit(1);
    }

    Ok(())
}
