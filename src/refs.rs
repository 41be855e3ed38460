//! Reference resolution: `HEAD`, `HEAD~N`, full and abbreviated
//! hashes, and branch names, all funneled through one entry point.

use crate::commit;
use crate::error::{Error, IoResultExt, Result};
use crate::fs as gfs;
use crate::hash;
use crate::repo::Repo;
use crate::store::ObjectStore;

/// How a raw ref argument was classified before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RefToken {
    Head,
    HeadAncestor(u32),
    FullHash([u8; 20]),
    Prefix(String),
    Branch(String),
}

fn classify(token: &str) -> RefToken {
    if token == "HEAD" {
        return RefToken::Head;
    }
    if let Some(rest) = token.strip_prefix("HEAD~") {
        if let Ok(n) = rest.parse::<u32>() {
            return RefToken::HeadAncestor(n);
        }
    }
    if token.len() == 40 && hash::is_full_hex(token) {
        if let Ok(h) = hash::from_string(token) {
            return RefToken::FullHash(h);
        }
    }
    if (4..40).contains(&token.len()) && hash::is_hex_prefix(token) {
        return RefToken::Prefix(token.to_string());
    }
    RefToken::Branch(token.to_string())
}

/// What `HEAD` currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// `HEAD` is `ref: refs/heads/<name>`.
    Symbolic(String),
    /// `HEAD` holds a commit hash directly, after a single-ref checkout.
    Detached([u8; 20]),
}

/// Reads and classifies the raw contents of `HEAD`.
pub fn read_head(repo: &Repo) -> Result<HeadState> {
    let content = gfs::read_file(&repo.head_path())?;
    let text = std::str::from_utf8(&content)
        .map_err(|_| Error::CorruptObject("non-utf8 HEAD".into()))?
        .trim();
    if let Some(branch) = text.strip_prefix("ref: refs/heads/") {
        return Ok(HeadState::Symbolic(branch.to_string()));
    }
    Ok(HeadState::Detached(hash::from_string(text)?))
}

/// The branch name `HEAD` currently points to. Fails if `HEAD` is detached.
pub fn current_branch(repo: &Repo) -> Result<String> {
    match read_head(repo)? {
        HeadState::Symbolic(branch) => Ok(branch),
        HeadState::Detached(hash) => Err(Error::CorruptObject(format!(
            "HEAD is detached at {}, not a branch",
            hash::to_string(&hash)
        ))),
    }
}

/// Points `HEAD` at `branch` (does not create the branch itself).
pub fn set_current_branch(repo: &Repo, branch: &str) -> Result<()> {
    gfs::write_file(
        &repo.head_path(),
        format!("ref: refs/heads/{branch}\n").as_bytes(),
    )
}

/// Detaches `HEAD`, pointing it directly at `hash` (as a single-ref
/// `checkout` does).
pub fn detach_head(repo: &Repo, hash: &[u8; 20]) -> Result<()> {
    gfs::write_file(&repo.head_path(), format!("{}\n", hash::to_string(hash)).as_bytes())
}

/// The commit hash the given branch currently points to, or `None` if the
/// branch exists but has no commits yet.
pub fn branch_commit(repo: &Repo, branch: &str) -> Result<Option<[u8; 20]>> {
    let path = repo.branch_path(branch);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).with_path(&path)?;
    let text = content.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(hash::from_string(text)?))
}

/// Updates the branch ref to point at `hash`, creating the branch if needed.
pub fn update_branch(repo: &Repo, branch: &str, hash: &[u8; 20]) -> Result<()> {
    gfs::write_file(&repo.branch_path(branch), hash::to_string(hash).as_bytes())
}

/// The commit `HEAD` currently points to, or `None` before the first commit,
/// or if `HEAD` points somewhere unusable (a missing object, or one that
/// isn't a commit). Treated as "no current commit" rather than an error.
pub fn head_commit(repo: &Repo, store: &ObjectStore) -> Result<Option<[u8; 20]>> {
    let candidate = match read_head(repo)? {
        HeadState::Symbolic(branch) => branch_commit(repo, &branch)?,
        HeadState::Detached(hash) => Some(hash),
    };
    Ok(candidate.filter(|h| commit::exists(store, h)))
}

/// Resolves any ref token (HEAD, HEAD~N, full hash, abbreviated hash, branch
/// name) to a concrete commit hash.
pub fn resolve(repo: &Repo, store: &ObjectStore, token: &str) -> Result<[u8; 20]> {
    match classify(token) {
        RefToken::Head => {
            head_commit(repo, store)?.ok_or_else(|| Error::NotFound("HEAD (no commits yet)".into()))
        }
        RefToken::HeadAncestor(n) => {
            let mut current = head_commit(repo, store)?
                .ok_or_else(|| Error::NotFound("HEAD (no commits yet)".into()))?;
            for _ in 0..n {
                current = commit::parent_of(store, &current).map_err(|_| Error::OutOfHistory(n))?;
            }
            Ok(current)
        }
        RefToken::FullHash(h) => {
            if !commit::exists(store, &h) {
                return Err(Error::NotFound(token.to_string()));
            }
            Ok(h)
        }
        RefToken::Prefix(prefix) => {
            let mut candidates = store.candidates_with_prefix(&prefix)?;
            candidates.retain(|h| commit::exists(store, h));
            match candidates.len() {
                0 => Err(Error::NotFound(token.to_string())),
                1 => Ok(candidates[0]),
                _ => Err(Error::Ambiguous(token.to_string())),
            }
        }
        RefToken::Branch(name) => branch_commit(repo, &name)?
            .filter(|h| commit::exists(store, h))
            .ok_or_else(|| Error::NotFound(format!("branch {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::Commit;

    fn init() -> (tempfile::TempDir, Repo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        (dir, repo)
    }

    fn write_commit(store: &ObjectStore, parent: Option<[u8; 20]>) -> [u8; 20] {
        Commit {
            tree: hash::get_sha1_bytes(b"tree"),
            parent,
            author: "a <a@example.com> 1 +0000".into(),
            committer: "a <a@example.com> 1 +0000".into(),
            message: "msg\n".into(),
        }
        .write(store)
        .unwrap()
    }

    #[test]
    fn head_before_first_commit_is_not_found() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        assert!(matches!(resolve(&repo, &store, "HEAD"), Err(Error::NotFound(_))));
    }

    #[test]
    fn resolves_head_and_ancestors() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        let c1 = write_commit(&store, None);
        let c2 = write_commit(&store, Some(c1));
        update_branch(&repo, "master", &c2).unwrap();

        assert_eq!(resolve(&repo, &store, "HEAD").unwrap(), c2);
        assert_eq!(resolve(&repo, &store, "HEAD~1").unwrap(), c1);
        assert!(matches!(
            resolve(&repo, &store, "HEAD~2"),
            Err(Error::OutOfHistory(2))
        ));
    }

    #[test]
    fn resolves_full_and_prefix_hash() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        let c1 = write_commit(&store, None);
        update_branch(&repo, "master", &c1).unwrap();

        let full = hash::to_string(&c1);
        assert_eq!(resolve(&repo, &store, &full).unwrap(), c1);
        assert_eq!(resolve(&repo, &store, &full[..6]).unwrap(), c1);
    }

    #[test]
    fn detached_head_resolves_to_its_hash() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        let c1 = write_commit(&store, None);
        detach_head(&repo, &c1).unwrap();
        assert_eq!(resolve(&repo, &store, "HEAD").unwrap(), c1);
        assert!(matches!(current_branch(&repo), Err(Error::CorruptObject(_))));
    }

    #[test]
    fn full_hash_of_a_non_commit_object_is_not_found() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        let blob_hash = store.put(crate::store::Kind::Blob, b"not a commit").unwrap();
        let full = hash::to_string(&blob_hash);
        assert!(matches!(
            resolve(&repo, &store, &full),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn unknown_branch_is_not_found() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);
        assert!(matches!(
            resolve(&repo, &store, "feature"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn colliding_short_prefix_is_ambiguous_but_a_longer_one_resolves() {
        let (_dir, repo) = init();
        let store = ObjectStore::new(&repo, true);

        let mut seen: std::collections::HashMap<String, [u8; 20]> = std::collections::HashMap::new();
        let mut collision = None;
        for i in 0..5000 {
            let message = format!("msg {i}\n");
            let hash = Commit {
                tree: hash::get_sha1_bytes(message.as_bytes()),
                parent: None,
                author: "a <a@example.com> 1 +0000".into(),
                committer: "a <a@example.com> 1 +0000".into(),
                message,
            }
            .write(&store)
            .unwrap();
            let hex = hash::to_string(&hash);
            let prefix = hex[..4].to_string();
            if let Some(&existing) = seen.get(&prefix) {
                collision = Some((existing, hash));
                break;
            }
            seen.insert(prefix, hash);
        }
        let (h1, h2) = collision.expect("expected a 4-hex prefix collision within 5000 commits");

        let hex1 = hash::to_string(&h1);
        let hex2 = hash::to_string(&h2);
        assert!(matches!(
            resolve(&repo, &store, &hex1[..4]),
            Err(Error::Ambiguous(_))
        ));

        let common = hex1.bytes().zip(hex2.bytes()).take_while(|(a, b)| a == b).count();
        let unique_prefix = &hex1[..(common + 1).max(4)];
        assert_eq!(resolve(&repo, &store, unique_prefix).unwrap(), h1);
    }
}
