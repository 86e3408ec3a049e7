use crate::domain::{CommitRecord, VersionIdentifier};

/// A group of commits shipped under one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: VersionIdentifier,
    /// Tag commit that closes the release; `None` for changes not yet tagged
    pub anchor: Option<CommitRecord>,
    /// Attributed commits, newest first
    pub commits: Vec<CommitRecord>,
}

impl Release {
    pub fn new(
        version: VersionIdentifier,
        anchor: Option<CommitRecord>,
        commits: Vec<CommitRecord>,
    ) -> Self {
        Release {
            version,
            anchor,
            commits,
        }
    }

    /// True for the bucket of changes since the most recent tag
    pub fn is_unreleased(&self) -> bool {
        self.anchor.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
