//! commit-gate - pre-commit checks for committer email and prohibited files.

use std::io;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commit_gate::cli::{self, Cli, Commands};
use commit_gate::cli::hooks::InstallOutcome;
use commit_gate::git::SystemGit;
use commit_gate::Error;

fn main() {
    // stdout carries the report, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("commit_gate=warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => {}
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            debug!(error = ?e, configuration = e.is_configuration(), "commit-gate failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Error> {
    match cli.command {
        Commands::CheckFilenames(args) => {
            cli::filenames::run(&args, &SystemGit, &mut io::stdout().lock())
        }
        Commands::CheckEmail(args) => cli::email::run(&args, &SystemGit, &mut io::stdout().lock()),
        Commands::InstallHook { force } => {
            let project_root = std::env::current_dir()?;
            match cli::hooks::install_hook(&project_root, force)? {
                InstallOutcome::Installed => println!("pre-commit hook installed."),
                InstallOutcome::Updated => println!("pre-commit hook updated."),
                InstallOutcome::AlreadyInstalled => {
                    println!("pre-commit hook already installed. Use --force to rewrite it.")
                }
                InstallOutcome::NoGit => {
                    println!("No .git directory found in this project.");
                    return Ok(1);
                }
            }
            Ok(0)
        }
        Commands::UninstallHook => {
            let project_root = std::env::current_dir()?;
            if cli::hooks::uninstall_hook(&project_root)? {
                println!("Removed commit-gate section from pre-commit hook.");
            } else {
                println!("No commit-gate section found in pre-commit hook.");
            }
            Ok(0)
        }
    }
}
