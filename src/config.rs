//! Runtime configuration: small, resolved once per invocation from
//! environment variables and build mode, never a global/static.

use crate::repo;

const VERIFY_VAR: &str = "GITNANO_VERIFY";

/// The resolved knobs for one CLI invocation.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Whether the object store re-reads and verifies every object right
    /// after writing it. Defaults to on in debug builds, off in release,
    /// and can be forced either way with `GITNANO_VERIFY=1`/`0`.
    pub verify_on_write: bool,
}

impl Config {
    pub fn resolve() -> Self {
        let verify_on_write = match std::env::var(VERIFY_VAR).as_deref() {
            Ok("1") => true,
            Ok("0") => false,
            _ => cfg!(debug_assertions),
        };
        Self { verify_on_write }
    }

    pub fn default_branch(&self) -> &'static str {
        repo::DEFAULT_BRANCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_var_overrides_build_mode() {
        std::env::set_var(VERIFY_VAR, "0");
        assert!(!Config::resolve().verify_on_write);
        std::env::set_var(VERIFY_VAR, "1");
        assert!(Config::resolve().verify_on_write);
        std::env::remove_var(VERIFY_VAR);
    }
}
