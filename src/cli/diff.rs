use gitnano::config::Config;
use gitnano::diff::ChangeType;
use gitnano::ops;
use gitnano::Result;

pub fn diff(ref1: Option<&str>, ref2: Option<&str>) -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    for change in ops::diff::run(&repo, &config, ref1, ref2)? {
        let tag = match change.change {
            ChangeType::Added => "A",
            ChangeType::Modified => "M",
            ChangeType::Deleted => "D",
        };
        println!("{tag} {}", change.path);
    }
    Ok(())
}
