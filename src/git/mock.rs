use crate::domain::{CommitRecord, TagRef};
use crate::error::{ChronicleError, Result};
use crate::git::Repository;
use chrono::DateTime;

#[derive(Debug, Clone)]
struct MockCommit {
    record: CommitRecord,
    parent_count: usize,
    changed_paths: Vec<String>,
}

/// In-memory repository for testing without actual git operations
///
/// Commits are appended oldest first, the way history is written; the walk
/// from HEAD returns them newest first.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: Vec<TagRef>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit with an explicit parent count
    pub fn add_commit(&mut self, record: CommitRecord, parent_count: usize, changed_paths: &[&str]) {
        self.commits.push(MockCommit {
            record,
            parent_count,
            changed_paths: changed_paths.iter().map(|p| p.to_string()).collect(),
        });
    }

    /// Append an ordinary single-parent commit and return its hash
    pub fn commit(&mut self, hash: &str, message: &str, changed_paths: &[&str]) -> String {
        self.add_commit(Self::record(hash, message), 1, changed_paths);
        hash.to_string()
    }

    /// Append a two-parent merge commit and return its hash
    pub fn merge(&mut self, hash: &str, message: &str, changed_paths: &[&str]) -> String {
        self.add_commit(Self::record(hash, message), 2, changed_paths);
        hash.to_string()
    }

    /// Add a tag pointing at a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.tags.push(TagRef::new(name, target));
    }

    fn record(hash: &str, message: &str) -> CommitRecord {
        let timestamp = DateTime::from_timestamp(0, 0).unwrap_or_default();
        CommitRecord::new(hash, message, timestamp, "Mock Author")
    }
}

impl Repository for MockRepository {
    fn head_commits(&self) -> Result<Vec<CommitRecord>> {
        Ok(self.commits.iter().rev().map(|c| c.record.clone()).collect())
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn changed_paths(&self, hash: &str) -> Result<Option<Vec<String>>> {
        let commit = self
            .commits
            .iter()
            .find(|c| c.record.hash == hash)
            .ok_or_else(|| ChronicleError::Git(git2::Error::from_str(&format!("unknown commit {}", hash))))?;

        if commit.parent_count != 1 {
            return Ok(None);
        }
        Ok(Some(commit.changed_paths.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_commits_are_newest_first() {
        let mut repo = MockRepository::new();
        repo.commit("c1", "first", &["a.txt"]);
        repo.commit("c2", "second", &["b.txt"]);

        let hashes: Vec<String> = repo
            .head_commits()
            .unwrap()
            .into_iter()
            .map(|c| c.hash)
            .collect();
        assert_eq!(hashes, vec!["c2", "c1"]);
    }

    #[test]
    fn test_merge_commit_has_no_diff() {
        let mut repo = MockRepository::new();
        repo.commit("c1", "first", &["a.txt"]);
        repo.merge("m1", "Merge branch", &["a.txt"]);

        assert_eq!(repo.changed_paths("c1").unwrap(), Some(vec!["a.txt".to_string()]));
        assert_eq!(repo.changed_paths("m1").unwrap(), None);
    }

    #[test]
    fn test_unknown_commit_is_an_error() {
        let repo = MockRepository::new();
        assert!(repo.changed_paths("nope").is_err());
    }
}
