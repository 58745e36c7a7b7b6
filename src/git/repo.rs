use crate::error::RepoError;
use git2::{Delta, DiffFindOptions, ErrorCode, Oid, Repository};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Information about a git commit within a tracked-path lineage
#[derive(Debug, Clone, Serialize)]
pub struct CommitMeta {
    /// Full commit SHA hash (40 characters)
    pub id: String,
    /// Author's name
    pub author_name: String,
    /// Author's email address
    pub author_email: String,
    /// Commit timestamp (Unix epoch seconds)
    pub timestamp: i64,
    /// Commit message (first line and body)
    pub message: String,
    /// SHA of the first parent, or None for a root commit
    pub parent: Option<String>,
    /// Path the tracked file had at this commit (renames followed backward)
    pub path: String,
}

/// Open handle on a local git repository.
///
/// One handle per history request; the handle is never shared mutable state
/// across requests, so concurrent requests against different repositories
/// cannot interfere.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Open the repository at `path`, failing when no git metadata is found
    /// there.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                RepoError::NotARepository(path.display().to_string())
            } else {
                RepoError::OpenFailed(e.message().to_string())
            }
        })?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoError::OpenFailed("repository has no working tree".to_string()))?
            .to_path_buf();

        tracing::debug!("Opened git repository at: {}", workdir.display());
        Ok(Self { repo, workdir })
    }

    /// Read the working-tree version of a file
    pub fn read_file(&self, path: &str) -> Result<String, RepoError> {
        let full = self.workdir.join(path);
        std::fs::read_to_string(&full).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RepoError::FileNotFound(path.to_string())
            } else {
                RepoError::ReadFailed {
                    path: path.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// Ordered list of commits that touched `path`, oldest first.
    ///
    /// Walks first-parent lineage backward from HEAD with rename detection
    /// enabled; a commit is recorded when the diff against its first parent
    /// shows the tracked path (at that point in history) as added, modified,
    /// renamed, or copied. Each entry carries the path the file had at that
    /// commit.
    pub fn commits_touching(&self, path: &str) -> Result<Vec<CommitMeta>, RepoError> {
        let walk_err = |e: git2::Error| RepoError::HistoryWalkFailed {
            path: path.to_string(),
            reason: e.message().to_string(),
        };

        let mut commit = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(walk_err)?;
        let mut current_path = path.to_string();
        let mut history = Vec::new();

        loop {
            let parent = if commit.parent_count() > 0 {
                Some(commit.parent(0).map_err(walk_err)?)
            } else {
                None
            };

            let parent_tree = match &parent {
                Some(p) => Some(p.tree().map_err(walk_err)?),
                None => None,
            };
            let tree = commit.tree().map_err(walk_err)?;
            let mut diff = self
                .repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
                .map_err(walk_err)?;
            let mut find_opts = DiffFindOptions::new();
            find_opts.renames(true).copies(true);
            diff.find_similar(Some(&mut find_opts)).map_err(walk_err)?;

            for delta in diff.deltas() {
                let new_path = delta
                    .new_file()
                    .path()
                    .map(|p| p.to_string_lossy().into_owned());
                if new_path.as_deref() != Some(current_path.as_str()) {
                    continue;
                }
                if matches!(
                    delta.status(),
                    Delta::Added | Delta::Modified | Delta::Renamed | Delta::Copied
                ) {
                    history.push(commit_meta(&commit, &current_path));
                    if matches!(delta.status(), Delta::Renamed | Delta::Copied)
                        && let Some(old) = delta.old_file().path()
                    {
                        // follow the rename backward
                        current_path = old.to_string_lossy().into_owned();
                    }
                }
                break;
            }

            match parent {
                Some(p) => commit = p,
                None => break,
            }
        }

        history.reverse();
        tracing::debug!(
            "Found {} commits touching '{}' (oldest path '{}')",
            history.len(),
            path,
            history.first().map(|c| c.path.as_str()).unwrap_or(path)
        );
        Ok(history)
    }

    /// Load a file's content at a specific commit. Returns an empty string
    /// when the path did not exist at that commit; that is not an error.
    pub fn read_file_at_commit(&self, path: &str, commit_id: &str) -> Result<String, RepoError> {
        let invalid = |e: git2::Error| RepoError::InvalidCommit {
            commit: commit_id.to_string(),
            reason: e.message().to_string(),
        };
        let read_err = |e: git2::Error| RepoError::ReadFailed {
            path: path.to_string(),
            reason: e.message().to_string(),
        };

        let oid = Oid::from_str(commit_id).map_err(invalid)?;
        let commit = self.repo.find_commit(oid).map_err(invalid)?;
        let tree = commit.tree().map_err(read_err)?;

        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(String::new()),
            Err(e) => return Err(read_err(e)),
        };
        let blob = self.repo.find_blob(entry.id()).map_err(read_err)?;
        Ok(String::from_utf8_lossy(blob.content()).into_owned())
    }

    /// Paths of all files modified between two commits (tree diff, new-side
    /// paths).
    pub fn modified_paths_between(
        &self,
        old_id: &str,
        new_id: &str,
    ) -> Result<Vec<String>, RepoError> {
        let diff_err = |e: git2::Error| RepoError::DiffFailed {
            old: old_id.to_string(),
            new: new_id.to_string(),
            reason: e.message().to_string(),
        };

        let old_tree = self.commit_tree(old_id)?;
        let new_tree = self.commit_tree(new_id)?;
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)
            .map_err(diff_err)?;

        let mut paths = Vec::new();
        for delta in diff.deltas() {
            if let Some(path) = delta.new_file().path() {
                paths.push(path.to_string_lossy().into_owned());
            }
        }
        Ok(paths)
    }

    fn commit_tree(&self, commit_id: &str) -> Result<git2::Tree<'_>, RepoError> {
        let invalid = |e: git2::Error| RepoError::InvalidCommit {
            commit: commit_id.to_string(),
            reason: e.message().to_string(),
        };
        let oid = Oid::from_str(commit_id).map_err(invalid)?;
        self.repo
            .find_commit(oid)
            .and_then(|c| c.tree())
            .map_err(invalid)
    }
}

fn commit_meta(commit: &git2::Commit, path: &str) -> CommitMeta {
    let author = commit.author();
    CommitMeta {
        id: commit.id().to_string(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        timestamp: commit.time().seconds(),
        message: commit.message().unwrap_or("").to_string(),
        parent: commit.parent_ids().next().map(|oid| oid.to_string()),
        path: path.to_string(),
    }
}
