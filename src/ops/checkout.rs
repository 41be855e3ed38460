//! `checkout`: full-tree restore (detaching HEAD) or a single-path restore.

use crate::commit;
use crate::config::Config;
use crate::error::Result;
use crate::refs;
use crate::repo::Repo;
use crate::restore::{self, RestoreStats};
use crate::workspace;

/// What a checkout actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Full(RestoreStats),
    SinglePath(String),
}

/// Resolves `ref_token` and restores it into the working directory: either
/// the whole tree (detaching `HEAD`), or, if `path` is given, just that one
/// file.
pub fn run(repo: &Repo, config: &Config, ref_token: &str, path: Option<&str>) -> Result<Outcome> {
    let store = super::store(repo, config);
    let commit_hash = refs::resolve(repo, &store, ref_token)?;
    let tree_hash = commit::tree_of(&store, &commit_hash)?;

    if let Some(p) = path {
        restore::restore_path(&store, tree_hash, p, repo.working_dir())?;
        return Ok(Outcome::SinglePath(p.to_string()));
    }

    let stats = restore::restore(&store, tree_hash, repo.working_dir())?;
    refs::detach_head(repo, &commit_hash)?;
    workspace::resolve(repo).mirror(repo.working_dir())?;

    tracing::info!(
        hash = %crate::hash::to_string(&commit_hash),
        added = stats.added,
        modified = stats.modified,
        deleted = stats.deleted,
        "checked out commit"
    );
    Ok(Outcome::Full(stats))
}
