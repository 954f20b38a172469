//! Prohibited filename check.

use std::io::Write;

use tracing::{debug, info};

use super::{split_list, FilenamesArgs};
use crate::config::Config;
use crate::error::Error;
use crate::git::GitRepo;
use crate::matcher::{Matcher, RuleSources, ScanMode};

/// Run the check-filenames command. Returns the process exit code.
pub fn run(args: &FilenamesArgs, git: &dyn GitRepo, out: &mut dyn Write) -> Result<i32, Error> {
    let config = Config::resolve(args.config.as_deref())?;
    let sources = rule_sources(&config, args);

    // Compile before looking up candidates so a bad rule fails first
    let matcher = Matcher::new(&sources)?;
    if matcher.rules().is_empty() {
        debug!("No prohibition rules configured");
        return Ok(0);
    }

    let candidates = if args.files.is_empty() {
        debug!("No filenames given, using files added in the index");
        git.staged_added_files()?
    } else {
        args.files.clone()
    };

    if candidates.is_empty() {
        debug!(rules = matcher.rules().len(), "No candidates to check");
        return Ok(0);
    }

    let mode = if args.fail_fast || config.filenames.fail_fast {
        ScanMode::FailFast
    } else {
        ScanMode::Batch
    };

    let mut report = matcher.check(&candidates, mode);
    if args.dedupe {
        report = report.dedupe();
    }

    info!(
        candidates = candidates.len(),
        hits = report.hits().len(),
        ?mode,
        "Checked filenames"
    );

    report.write_to(out, args.format)?;
    Ok(report.exit_code())
}

/// Configured rules followed by the ones given on the command line.
fn rule_sources(config: &Config, args: &FilenamesArgs) -> RuleSources {
    let mut sources = RuleSources {
        filenames: config.filenames.prohibited.clone(),
        patterns: config.filenames.patterns.clone(),
        regexes: config.filenames.regexes.clone(),
    };
    sources.filenames.extend(split_list(&args.filenames));
    sources.patterns.extend(split_list(&args.patterns));
    sources.regexes.extend(args.regexes.iter().cloned());
    sources
}
