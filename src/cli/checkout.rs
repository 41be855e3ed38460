use gitnano::config::Config;
use gitnano::ops::{self, checkout::Outcome};
use gitnano::Result;

pub fn checkout(reference: &str, path: Option<&str>) -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    match ops::checkout::run(&repo, &config, reference, path)? {
        Outcome::Full(stats) => println!(
            "added {}, modified {}, deleted {}",
            stats.added, stats.modified, stats.deleted
        ),
        Outcome::SinglePath(p) => println!("restored {p}"),
    }
    Ok(())
}
