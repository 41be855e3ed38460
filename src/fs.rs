//! Small filesystem utilities shared by the tree builder, restore engine and diff.

use crate::error::{IoResultExt, Result};
use std::{
    collections::VecDeque,
    fs,
    path::{Component, Path, PathBuf},
};

/// The name of the repository metadata directory, always skipped when
/// walking a working directory.
pub const REPO_DIR_NAME: &str = ".gitnano";

/// Lexically normalizes a path (resolves `.` and `..` components) without
/// touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for comp in path.components() {
        use Component::*;
        match comp {
            Prefix(pf) => ret.push(pf.as_os_str()),
            RootDir => ret.push("/"),
            CurDir => {}
            ParentDir => {
                ret.pop();
            }
            Normal(n) => ret.push(n),
        }
    }
    ret
}

/// Ensures every component of `dir` exists, creating directories as needed.
pub fn ensure_dir_all(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_path(dir)?;
    }
    Ok(())
}

/// Reads a whole file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_path(path)
}

/// Writes `content` to `path`, creating parent directories as needed and
/// overwriting any existing file.
pub fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_all(parent)?;
    }
    fs::write(path, content).with_path(path)
}

/// Breadth-first enumeration of every path under `root` (including `root`
/// itself), skipping the repository metadata directory wherever it appears.
pub fn traverse_path(root: &Path) -> Result<Vec<PathBuf>> {
    let mut ret = Vec::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(root.to_path_buf());

    while let Some(path) = queue.pop_front() {
        if path.file_name().is_some_and(|n| n == REPO_DIR_NAME) {
            continue;
        }
        if !path.is_dir() {
            ret.push(path);
            continue;
        }
        for entry in fs::read_dir(&path).with_path(&path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            queue.push_back(entry.path());
        }
        ret.push(path);
    }

    Ok(ret)
}

/// All regular files (and symlinks) under `root`, skipping the repository
/// metadata directory.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(traverse_path(root)?
        .into_iter()
        .filter(|p| p.is_file() || p.is_symlink())
        .collect())
}

/// Removes `dir` and then repeatedly removes now-empty parent directories.
/// Best-effort courtesy cleanup: any failure (not empty, already gone,
/// permission) is silently ignored.
pub fn remove_empty_dirs_upward(dir: &Path) {
    let mut current = Some(dir.to_path_buf());
    while let Some(d) = current {
        if fs::remove_dir(&d).is_err() {
            break;
        }
        current = d.parent().map(|p| p.to_path_buf());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_resolves_dotdot() {
        assert_eq!(normalize(Path::new("a/b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("./a/./b")), PathBuf::from("a/b"));
    }

    #[test]
    fn traversal_skips_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(REPO_DIR_NAME)).unwrap();
        fs::write(dir.path().join(REPO_DIR_NAME).join("HEAD"), "x").unwrap();
        fs::write(dir.path().join("a.txt"), "hi").unwrap();

        let files = list_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt")]);
    }

    #[test]
    fn write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deep/file.txt");
        write_file(&target, b"content").unwrap();
        assert_eq!(read_file(&target).unwrap(), b"content");
    }
}
