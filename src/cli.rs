use clap::{Parser, Subcommand};
use gitnano::error::IoResultExt;
use gitnano::repo::Repo;
use gitnano::Result;
use std::path::PathBuf;

mod add;
mod checkout;
mod commit;
mod diff;
mod init;
mod log;
mod status;

/// Minimal content-addressed version-control engine.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Init { path } => {
                let target = path.clone().map(Ok).unwrap_or_else(cwd)?;
                init::init(&target)
            }
            Command::Add { paths } => add::add(paths),
            Command::Commit { message } => commit::commit(message),
            Command::Checkout { reference, path } => checkout::checkout(reference, path.as_deref()),
            Command::Log { limit } => log::log(*limit),
            Command::Diff { ref1, ref2 } => diff::diff(ref1.as_deref(), ref2.as_deref()),
            Command::Status => status::status(),
        }
    }
}

/// Discovers the repository rooted at or above the current directory.
pub(crate) fn discover_repo() -> Result<Repo> {
    Repo::discover(&cwd()?)
}

fn cwd() -> Result<PathBuf> {
    std::env::current_dir().with_path(".")
}

#[derive(Subcommand)]
enum Command {
    /// Create a new gitnano repository.
    Init {
        /// Directory to initialize. Defaults to the current directory.
        path: Option<PathBuf>,
    },
    /// Record paths into the informational index.
    Add {
        /// Files or directories to record. Use `.` to record everything.
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },
    /// Snapshot the working directory as a new commit.
    Commit {
        /// The commit message. Required and must be non-empty.
        #[arg(short, long)]
        message: String,
    },
    /// Restore a commit's tree into the working directory, or a single path.
    Checkout {
        /// HEAD, HEAD~N, a full or abbreviated commit hash, or a branch name.
        reference: String,
        /// Restore only this path instead of the whole tree.
        path: Option<String>,
    },
    /// Print commit history, newest first.
    Log {
        /// Maximum number of commits to print.
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
    /// Compare two snapshots, or the working directory against HEAD.
    Diff {
        ref1: Option<String>,
        ref2: Option<String>,
    },
    /// Print the current branch/HEAD and pending working-directory changes.
    Status,
}
