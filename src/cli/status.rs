use gitnano::config::Config;
use gitnano::diff::ChangeType;
use gitnano::ops;
use gitnano::Result;

pub fn status() -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    let report = ops::status::run(&repo, &config)?;

    println!("{}", report.head_description);
    if report.changes.is_empty() {
        println!("nothing to commit, working directory clean");
        return Ok(());
    }
    for change in &report.changes {
        let tag = match change.change {
            ChangeType::Added => "A",
            ChangeType::Modified => "M",
            ChangeType::Deleted => "D",
        };
        println!("{tag} {}", change.path);
    }
    Ok(())
}
