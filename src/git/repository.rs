use crate::domain::{CommitRecord, TagRef};
use crate::error::Result;
use chrono::DateTime;
use git2::{Commit, Oid, Repository as Git2Repo, Sort};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
///
/// Everything handed out is owned data, so nothing borrowed from the
/// underlying object database outlives the handle.
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working directory of the repository, `None` for bare repositories
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    fn to_record(commit: &Commit<'_>) -> CommitRecord {
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let author = commit.author().name().unwrap_or("unknown").to_string();
        let timestamp = DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();

        CommitRecord::new(commit.id().to_string(), message, timestamp, author)
    }
}

impl super::Repository for Git2Repository {
    fn head_commits(&self) -> Result<Vec<CommitRecord>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(Self::to_record(&commit));
        }

        Ok(commits)
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id().to_string())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that does not point at a commit"),
            }
        }

        Ok(tags)
    }

    fn changed_paths(&self, hash: &str) -> Result<Option<Vec<String>>> {
        let commit = self.repo.find_commit(Oid::from_str(hash)?)?;
        if commit.parent_count() != 1 {
            return Ok(None);
        }

        let tree = commit.tree()?;
        let parent_tree = commit.parent(0)?.tree()?;
        let diff = self
            .repo
            .diff_tree_to_tree(Some(&parent_tree), Some(&tree), None)?;

        let paths: BTreeSet<String> = diff
            .deltas()
            .flat_map(|delta| [delta.old_file(), delta.new_file()])
            .filter_map(|file| file.path().map(|p| p.to_string_lossy().into_owned()))
            .collect();

        Ok(Some(paths.into_iter().collect()))
    }
}
