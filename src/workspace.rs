//! The optional workspace mirror: a best-effort shadow copy of the
//! working directory kept outside the repository, for tooling that wants a
//! stable path to read from without disturbing the user's tree. Off by
//! default; never a dependency for any core operation.

use crate::error::Result;
use crate::fs as gfs;
use crate::hash;
use crate::repo::Repo;
use std::path::PathBuf;

const ENABLE_VAR: &str = "GITNANO_WORKSPACE";

/// Something that can receive a copy of the working directory after a
/// snapshot. Kept as a trait so a no-op implementation costs nothing when
/// mirroring is disabled.
pub trait WorkspaceMirror {
    fn mirror(&self, working_dir: &std::path::Path) -> Result<()>;
}

pub struct NoopMirror;

impl WorkspaceMirror for NoopMirror {
    fn mirror(&self, _working_dir: &std::path::Path) -> Result<()> {
        Ok(())
    }
}

/// Mirrors every file in the working directory into a per-repository
/// directory under the user's data directory.
pub struct ShadowCopyMirror {
    target: PathBuf,
}

impl ShadowCopyMirror {
    fn new(repo: &Repo) -> Option<Self> {
        let data_dir = dirs::data_dir()?;
        let repo_id = hash::get_sha1_string(repo.working_dir().to_string_lossy().as_bytes());
        Some(Self {
            target: data_dir.join("gitnano").join("workspaces").join(repo_id),
        })
    }
}

impl WorkspaceMirror for ShadowCopyMirror {
    fn mirror(&self, working_dir: &std::path::Path) -> Result<()> {
        for path in gfs::list_files(working_dir)? {
            let relative = match path.strip_prefix(working_dir) {
                Ok(r) => r,
                Err(_) => continue,
            };
            let dest = self.target.join(relative);
            let content = match gfs::read_file(&path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable file in workspace mirror");
                    continue;
                }
            };
            if let Err(e) = gfs::write_file(&dest, &content) {
                tracing::warn!(path = %dest.display(), error = %e, "failed to mirror file");
            }
        }
        Ok(())
    }
}

/// Picks the mirror implementation for this invocation, based on
/// `GITNANO_WORKSPACE`. Never returns an error: a missing data directory or
/// disabled opt-in just means mirroring does nothing.
pub fn resolve(repo: &Repo) -> Box<dyn WorkspaceMirror> {
    let enabled = std::env::var(ENABLE_VAR).map(|v| v == "1").unwrap_or(false);
    if !enabled {
        return Box::new(NoopMirror);
    }
    match ShadowCopyMirror::new(repo) {
        Some(mirror) => Box::new(mirror),
        None => Box::new(NoopMirror),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_mirror_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(NoopMirror.mirror(dir.path()).is_ok());
    }

    #[test]
    fn disabled_by_default() {
        std::env::remove_var(ENABLE_VAR);
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        // Can't downcast trait objects here without `Any`, but resolving
        // must not panic or touch the filesystem when disabled.
        let mirror = resolve(&repo);
        assert!(mirror.mirror(dir.path()).is_ok());
    }
}
