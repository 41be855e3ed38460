//! `add`: records observed paths into the informational index.

use crate::config::Config;
use crate::error::Result;
use crate::fs as gfs;
use crate::index::{self, IndexEntry};
use crate::repo::Repo;
use crate::store::Kind;
use std::path::{Path, PathBuf};

/// Records every regular file reachable from `paths` (resolved relative to
/// the working directory) into the index. Returns the number of files
/// recorded.
pub fn run(repo: &Repo, _config: &Config, paths: &[PathBuf]) -> Result<usize> {
    let mut entries = Vec::new();

    for raw in paths {
        let absolute = gfs::normalize(&resolve_against(repo.working_dir(), raw));
        let files = if absolute.is_dir() {
            gfs::list_files(&absolute)?
        } else {
            vec![absolute]
        };

        for file in files {
            if !file.is_file() {
                continue;
            }
            let content = gfs::read_file(&file)?;
            let hash = crate::store::ObjectStore::hash_of(Kind::Blob, &content);
            let relative = file
                .strip_prefix(repo.working_dir())
                .unwrap_or(&file)
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/");
            entries.push(IndexEntry { hash, path: relative });
        }
    }

    let count = entries.len();
    index::record(repo, &entries)?;
    Ok(count)
}

fn resolve_against(base: &Path, raw: &Path) -> PathBuf {
    if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base.join(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Repo;

    #[test]
    fn add_records_every_file_under_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let config = Config::resolve();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/a.rs"), "fn a() {}").unwrap();
        std::fs::write(dir.path().join("src/b.rs"), "fn b() {}").unwrap();

        let count = run(&repo, &config, &[PathBuf::from(".")]).unwrap();
        assert_eq!(count, 2);

        let entries = index::read(&repo).unwrap();
        assert_eq!(entries.len(), 2);
    }
}
