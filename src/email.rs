//! Committer email domain check.

use tracing::debug;

use crate::error::Error;
use crate::git::GitRepo;

/// Outcome of checking the configured committer email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailCheck {
    Allowed { email: String },
    Disallowed { email: String, domain: String },
}

impl EmailCheck {
    pub fn exit_code(&self) -> i32 {
        match self {
            EmailCheck::Allowed { .. } => 0,
            EmailCheck::Disallowed { .. } => 1,
        }
    }
}

/// Domain part of an address: everything after the last `@`.
pub fn email_domain(email: &str) -> Result<&str, Error> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .ok_or_else(|| Error::InvalidEmail(email.to_string()))
}

/// Case-insensitive membership test.
pub fn domain_allowed<S: AsRef<str>>(domain: &str, allowed: &[S]) -> bool {
    let domain = domain.to_lowercase();
    allowed
        .iter()
        .any(|candidate| candidate.as_ref().to_lowercase() == domain)
}

/// Read `user.email` from git and test its domain against `allowed`.
pub fn check_user_email<S: AsRef<str>>(
    git: &dyn GitRepo,
    allowed: &[S],
) -> Result<EmailCheck, Error> {
    let email = git
        .user_email()
        .map_err(|e| Error::EmailLookup(Box::new(e)))?;
    let email = email.trim().to_string();
    let domain = email_domain(&email)?.to_string();
    debug!(%email, %domain, "Checking committer email");

    if domain_allowed(&domain, allowed) {
        Ok(EmailCheck::Allowed { email })
    } else {
        Ok(EmailCheck::Disallowed { email, domain })
    }
}

/// Guidance printed when the domain is not allowed.
pub fn disallowed_message<S: AsRef<str>>(allowed: &[S]) -> String {
    let domains: Vec<&str> = allowed.iter().map(|d| d.as_ref()).collect();
    format!(
        "Git user email does not match allowed domains,\n\
         please set it using 'git config user.email <email>'\n\
         or globally by 'git config --global user.email <email>'\n\
         \n\
         Domains allowed: {}",
        domains.join(", ")
    )
}
