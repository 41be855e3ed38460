use gitnano::config::Config;
use gitnano::hash;
use gitnano::ops;
use gitnano::Result;

pub fn log(limit: usize) -> Result<()> {
    let repo = crate::discover_repo()?;
    let config = Config::resolve();
    for entry in ops::log::run(&repo, &config, limit)? {
        println!("commit {}", hash::to_string(&entry.hash));
        println!("Author: {}", entry.author);
        println!();
        for line in entry.message.lines() {
            println!("    {line}");
        }
        println!();
    }
    Ok(())
}
