//! `diff`: dispatches to working-directory or tree-to-tree comparison
//! depending on how many refs were given.

use crate::commit;
use crate::config::Config;
use crate::diff::{self as diffmod, Change};
use crate::refs;
use crate::repo::Repo;
use crate::error::Result;

/// 0 args: working directory vs `HEAD`. 1 arg: `ref1` vs `HEAD`. 2 args:
/// `ref1` vs `ref2`.
pub fn run(repo: &Repo, config: &Config, ref1: Option<&str>, ref2: Option<&str>) -> Result<Vec<Change>> {
    let store = super::store(repo, config);

    let head_tree = refs::head_commit(repo, &store)?
        .map(|h| commit::tree_of(&store, &h))
        .transpose()?;

    match (ref1, ref2) {
        (None, None) => diffmod::diff_working_dir(&store, head_tree, repo.working_dir()),
        (Some(r1), None) => {
            let c1 = refs::resolve(repo, &store, r1)?;
            let t1 = commit::tree_of(&store, &c1)?;
            diffmod::diff_trees(&store, Some(t1), head_tree)
        }
        (Some(r1), Some(r2)) => {
            let c1 = refs::resolve(repo, &store, r1)?;
            let c2 = refs::resolve(repo, &store, r2)?;
            let t1 = commit::tree_of(&store, &c1)?;
            let t2 = commit::tree_of(&store, &c2)?;
            diffmod::diff_trees(&store, Some(t1), Some(t2))
        }
        (None, Some(_)) => unreachable!("CLI never supplies ref2 without ref1"),
    }
}
