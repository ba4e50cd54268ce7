//! rc-cascade
//!
//! Resolves and prints the layered configuration of an application.

use anyhow::{Context, Result};
use clap::Parser;
use rc_cascade::argv::parse_args;
use rc_cascade::cli::{Cli, Command, ShowArgs, SourcesArgs};
use rc_cascade::config::discovery::candidates;
use rc_cascade::config::{CONFIG_KEY, CascadeContext, Tree, TreePath};
use serde_json::Value;
use std::fs::OpenOptions;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("failed to open log file {filename}"))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    match cli.command {
        Command::Show(args) => show(args),
        Command::Sources(args) => sources(args),
    }
}

fn show(args: ShowArgs) -> Result<()> {
    let defaults = match args.defaults {
        Some(ref path) => {
            let content = std::fs::read(path)
                .with_context(|| format!("failed to read defaults {}", path.display()))?;
            serde_json::from_slice::<Tree>(&content)
                .with_context(|| format!("defaults {} must be a JSON object", path.display()))?
        }
        None => Tree::new(),
    };
    let argv = parse_args(args.args);
    debug!(app = %args.app, "resolving configuration");

    let resolved = CascadeContext::discover()
        .resolve(&args.app, defaults, argv)
        .with_context(|| format!("failed to resolve configuration for {}", args.app))?;

    let value = match args.get {
        Some(ref key) => resolved.tree().get_path(key).cloned().unwrap_or(Value::Null),
        None => Value::from(resolved),
    };
    println!("{}", args.format.render(&value)?);
    Ok(())
}

fn sources(args: SourcesArgs) -> Result<()> {
    let ctx = CascadeContext::discover();
    let env = ctx.env_tree(&args.app);
    let argv = parse_args(args.args);

    let found = candidates(
        &ctx,
        &args.app,
        env.get(CONFIG_KEY).and_then(Value::as_str),
        argv.get(CONFIG_KEY).and_then(Value::as_str),
    );
    for candidate in found {
        let marker = if candidate.path.is_file() { "*" } else { " " };
        println!(
            "{marker} {:<12} {}",
            candidate.origin.to_string(),
            candidate.path.display()
        );
    }
    Ok(())
}
