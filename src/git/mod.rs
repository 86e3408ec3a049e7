//! Git history access layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! operations git-chronicle needs, so the release analysis can run against a
//! real repository or an in-memory one.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_chronicle::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! for commit in repo.head_commits()? {
//!     if let Some(paths) = repo.changed_paths(&commit.hash)? {
//!         println!("{} touched {} paths", commit.short_hash(), paths.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitRecord, TagRef};
use crate::error::Result;

/// Read-only view of a repository's history
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ChronicleError].
pub trait Repository {
    /// Commits reachable from HEAD, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<CommitRecord>)` - The walk of the current branch
    /// * `Err` - If HEAD cannot be resolved or an object is corrupt
    fn head_commits(&self) -> Result<Vec<CommitRecord>>;

    /// Every tag in the repository with the commit it points at
    ///
    /// Annotated tags are peeled to their target commit.
    fn tags(&self) -> Result<Vec<TagRef>>;

    /// Paths changed by a commit relative to its parent
    ///
    /// # Arguments
    /// * `hash` - Full hash of the commit
    ///
    /// # Returns
    /// * `Ok(Some(paths))` - Changed paths when the commit has exactly one parent
    /// * `Ok(None)` - For root commits and merge commits
    /// * `Err` - If the commit or its trees cannot be read
    fn changed_paths(&self, hash: &str) -> Result<Option<Vec<String>>>;
}
