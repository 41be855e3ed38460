//! `commit`: builds a tree of the working directory, creates a commit object
//! referencing it, and advances HEAD.

use crate::commit::Commit;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::identity;
use crate::index;
use crate::refs::{self, HeadState};
use crate::repo::Repo;
use crate::timestamp;
use crate::tree_builder;
use crate::workspace;

/// Creates a snapshot commit with `message`, returning its hash.
pub fn run(repo: &Repo, config: &Config, message: &str) -> Result<[u8; 20]> {
    if message.trim().is_empty() {
        return Err(Error::InvalidArgument("commit message must not be empty".into()));
    }

    let store = super::store(repo, config);
    workspace::resolve(repo).mirror(repo.working_dir())?;

    let tree_hash = tree_builder::build(&store, repo.working_dir())?;
    let parent = refs::head_commit(repo, &store)?;

    let who = identity::current();
    let when = timestamp::now();
    let signature = format!("{who} {when}");

    let commit = Commit {
        tree: tree_hash,
        parent,
        author: signature.clone(),
        committer: signature,
        message: message.to_string(),
    };
    let hash = commit.write(&store)?;

    match refs::read_head(repo)? {
        HeadState::Symbolic(branch) => refs::update_branch(repo, &branch, &hash)?,
        HeadState::Detached(_) => refs::detach_head(repo, &hash)?,
    }
    index::truncate(repo)?;

    tracing::info!(hash = %crate::hash::to_string(&hash), "created commit");
    Ok(hash)
}
