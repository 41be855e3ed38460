//! `status`: repo/branch/HEAD summary plus a working-directory diff.

use crate::commit;
use crate::config::Config;
use crate::diff::{self as diffmod, Change};
use crate::error::Result;
use crate::hash;
use crate::refs::{self, HeadState};
use crate::repo::Repo;

/// What to print for `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub working_dir: std::path::PathBuf,
    pub head_description: String,
    pub head: Option<[u8; 20]>,
    pub changes: Vec<Change>,
}

pub fn run(repo: &Repo, config: &Config) -> Result<Report> {
    let store = super::store(repo, config);

    let head_description = match refs::read_head(repo)? {
        HeadState::Symbolic(branch) => format!("on branch {branch}"),
        HeadState::Detached(h) => format!("detached at {}", hash::to_string(&h)),
    };

    let head = refs::head_commit(repo, &store)?;
    let head_tree = head.map(|h| commit::tree_of(&store, &h)).transpose()?;
    let changes = diffmod::diff_working_dir(&store, head_tree, repo.working_dir())?;

    Ok(Report {
        working_dir: repo.working_dir().to_path_buf(),
        head_description,
        head,
        changes,
    })
}
