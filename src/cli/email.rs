//! Committer email check.

use std::io::Write;

use tracing::info;

use super::{split_list, EmailArgs};
use crate::config::Config;
use crate::email::{check_user_email, disallowed_message, EmailCheck};
use crate::error::Error;
use crate::git::GitRepo;

/// Run the check-email command. Returns the process exit code.
pub fn run(args: &EmailArgs, git: &dyn GitRepo, out: &mut dyn Write) -> Result<i32, Error> {
    let config = Config::resolve(args.config.as_deref())?;
    let mut allowed = config.email.allowed_domains;
    allowed.extend(split_list(&args.allowed_domains));

    let check = check_user_email(git, &allowed)?;
    match &check {
        EmailCheck::Allowed { email } => {
            info!(%email, "Committer email allowed");
        }
        EmailCheck::Disallowed { email, domain } => {
            info!(%email, %domain, "Committer email domain not allowed");
            writeln!(out, "{}", disallowed_message(&allowed))?;
        }
    }
    Ok(check.exit_code())
}
