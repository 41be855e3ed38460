//! `init`: create the `.gitnano` skeleton at a path.

use crate::error::Result;
use crate::repo::Repo;
use std::path::Path;

pub fn run(at: &Path) -> Result<Repo> {
    let repo = Repo::init(at)?;
    tracing::info!(path = %repo.gitnano_path().display(), "initialized repository");
    Ok(repo)
}
