use gitnano::config::Config;
use gitnano::ops;
use gitnano::Result;
use std::path::PathBuf;

pub fn add(paths: &[PathBuf]) -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    let count = ops::add::run(&repo, &config, paths)?;
    println!("recorded {count} path(s)");
    Ok(())
}
