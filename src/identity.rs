//! Author identity resolution: environment overrides first, then the
//! local user account, and a last-resort default that never fails.

use std::env;

const NAME_VAR: &str = "GITNANO_AUTHOR_NAME";
const EMAIL_VAR: &str = "GITNANO_AUTHOR_EMAIL";
const FALLBACK_NAME: &str = "unknown";
const FALLBACK_EMAIL: &str = "unknown@localhost";

/// A commit author/committer identity, formatted as `name <email>`.
pub fn current() -> String {
    let name = env::var(NAME_VAR)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            let realname = whoami::realname();
            if realname.is_empty() {
                FALLBACK_NAME.to_string()
            } else {
                realname
            }
        });

    let email = env::var(EMAIL_VAR)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("{}@{}", whoami::username(), local_host()));

    let email = if email.contains('@') {
        email
    } else {
        FALLBACK_EMAIL.to_string()
    };

    format!("{name} <{email}>")
}

fn local_host() -> String {
    whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string())
}
