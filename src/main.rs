use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod config;
mod git;
mod logging;
mod proposals;
mod renumber;
mod util;

use cli::RootArgs;
use config::RenumberConfig;
use renumber::RenumberReport;

fn main() -> ExitCode {
    let args = RootArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", util::error_chain_message(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &RootArgs) -> Result<()> {
    logging::init(args.verbose)?;
    let config = RenumberConfig::from_args(args)?;
    tracing::debug!(
        repo_root = %config.repo_root.display(),
        mips_dir = %config.mips_dir.display(),
        stage = config.stage,
        dry_run = config.dry_run,
        "resolved configuration"
    );
    let report = renumber::run(&config)?;
    print_report(&report, args.json)
}

fn print_report(report: &RenumberReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("serialize report")?;
        println!("{text}");
        return Ok(());
    }
    println!("{}", report.message());
    if report.staged {
        println!("Staged rename with git add.");
    }
    Ok(())
}
