//! High-level operations: the seam between the CLI and the core collaborators.

pub mod add;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod status;

use crate::config::Config;
use crate::repo::Repo;
use crate::store::ObjectStore;

fn store<'a>(repo: &'a Repo, config: &Config) -> ObjectStore<'a> {
    ObjectStore::new(repo, config.verify_on_write)
}
