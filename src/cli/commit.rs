use gitnano::config::Config;
use gitnano::hash;
use gitnano::ops;
use gitnano::Result;

pub fn commit(message: &str) -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    let hash = ops::commit::run(&repo, &config, message)?;
    println!("{}", hash::to_string(&hash));
    Ok(())
}
