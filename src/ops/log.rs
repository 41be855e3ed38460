//! `log`: walks the first-parent chain starting at `HEAD`, newest first.

use crate::commit::Commit;
use crate::config::Config;
use crate::error::Result;
use crate::refs;
use crate::repo::Repo;

/// One printable log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: [u8; 20],
    pub author: String,
    pub message: String,
}

/// Returns up to `limit` commits, starting at `HEAD` and following `parent`.
pub fn run(repo: &Repo, config: &Config, limit: usize) -> Result<Vec<LogEntry>> {
    let store = super::store(repo, config);
    let mut out = Vec::new();
    let mut current = refs::head_commit(repo, &store)?;

    while let Some(hash) = current {
        if out.len() >= limit {
            break;
        }
        let commit = Commit::read(&store, &hash)?;
        out.push(LogEntry {
            hash,
            author: commit.author.clone(),
            message: commit.message.clone(),
        });
        current = commit.parent;
    }

    Ok(out)
}
