use gitnano::ops;
use gitnano::Result;
use std::path::Path;

pub fn init(at: &Path) -> Result<()> {
    ops::init::run(at)?;
    println!("Initialized empty gitnano repository in {}", at.display());
    Ok(())
}
