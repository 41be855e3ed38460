//! Resolves the repository root and hands every operation an explicit set of
//! paths, instead of relying on the process's current directory.

use crate::error::{Error, IoResultExt, Result};
use std::path::{Path, PathBuf};

/// The repository metadata directory name.
pub const GITNANO_DIR: &str = ".gitnano";

/// The default (and only) branch name this core supports.
pub const DEFAULT_BRANCH: &str = "master";

/// An explicit handle on a discovered (or freshly created) repository: the
/// absolute path of `.gitnano/` and of the directory to treat as the working
/// tree. No operation that holds a `Repo` needs to `chdir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    working_dir: PathBuf,
    gitnano_path: PathBuf,
}

impl Repo {
    /// Walks up from `start` looking for a `.gitnano` directory.
    pub fn discover(start: &Path) -> Result<Repo> {
        let mut dir = start
            .canonicalize()
            .with_path(start)
            .unwrap_or_else(|_| start.to_path_buf());
        loop {
            let candidate = dir.join(GITNANO_DIR);
            if candidate.is_dir() {
                return Ok(Repo {
                    working_dir: dir,
                    gitnano_path: candidate,
                });
            }
            match dir.parent() {
                Some(p) => dir = p.to_path_buf(),
                None => return Err(Error::NotARepository(start.to_path_buf())),
            }
        }
    }

    /// Whether `start` or one of its ancestors already contains `.gitnano`.
    pub fn is_repo(start: &Path) -> bool {
        Self::discover(start).is_ok()
    }

    /// Creates the `.gitnano` skeleton under `at` and returns a locator for it.
    /// Fails if `at` is already inside a repository.
    pub fn init(at: &Path) -> Result<Repo> {
        if Self::is_repo(at) {
            return Err(Error::InvalidArgument(format!(
                "{} is already inside a gitnano repository",
                at.display()
            )));
        }
        crate::fs::ensure_dir_all(at)?;
        let gitnano_path = at.join(GITNANO_DIR);
        std::fs::create_dir(&gitnano_path).with_path(&gitnano_path)?;

        let repo = Repo {
            working_dir: at
                .canonicalize()
                .with_path(at)
                .unwrap_or_else(|_| at.to_path_buf()),
            gitnano_path: gitnano_path.canonicalize().with_path(&gitnano_path)?,
        };

        std::fs::create_dir_all(repo.refs_heads_path()).with_path(repo.refs_heads_path())?;
        std::fs::create_dir_all(repo.objects_path()).with_path(repo.objects_path())?;
        crate::fs::write_file(&repo.index_path(), b"")?;
        crate::fs::write_file(
            &repo.head_path(),
            format!("ref: refs/heads/{DEFAULT_BRANCH}\n").as_bytes(),
        )?;

        Ok(repo)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn gitnano_path(&self) -> &Path {
        &self.gitnano_path
    }

    pub fn objects_path(&self) -> PathBuf {
        self.gitnano_path.join("objects")
    }

    pub fn refs_heads_path(&self) -> PathBuf {
        self.gitnano_path.join("refs").join("heads")
    }

    pub fn branch_path(&self, branch: &str) -> PathBuf {
        self.refs_heads_path().join(branch)
    }

    pub fn head_path(&self) -> PathBuf {
        self.gitnano_path.join("HEAD")
    }

    pub fn index_path(&self) -> PathBuf {
        self.gitnano_path.join("index")
    }
}
