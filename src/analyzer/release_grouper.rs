use crate::domain::{CommitRecord, Release, TagMap, VersionIdentifier};
use std::mem;
use tracing::debug;

/// A commit from the newest-first walk, with its relevance already decided
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCommit {
    pub record: CommitRecord,
    pub relevant: bool,
}

impl ObservedCommit {
    pub fn new(record: CommitRecord, relevant: bool) -> Self {
        ObservedCommit { record, relevant }
    }
}

/// Splits a newest-first commit walk into releases
///
/// Every commit tagged with a stable (non "0.x") component version closes the
/// release accumulated so far and becomes the anchor of the next, older one.
/// The tag commit itself is never a member of a release's commit list.
///
/// Yields releases newest first. The final, oldest release is only produced
/// when it has commits.
pub struct ReleaseGrouper<'a, I> {
    commits: I,
    tags: &'a TagMap,
    version: VersionIdentifier,
    anchor: Option<CommitRecord>,
    pending: Vec<CommitRecord>,
    exhausted: bool,
}

impl<'a, I> ReleaseGrouper<'a, I>
where
    I: Iterator<Item = ObservedCommit>,
{
    /// # Arguments
    /// * `commits` - Walk of the current branch, newest first
    /// * `tags` - The component's tag map
    /// * `current_version` - Declared version, used for changes since the last tag
    pub fn new<C>(commits: C, tags: &'a TagMap, current_version: VersionIdentifier) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        ReleaseGrouper {
            commits: commits.into_iter(),
            tags,
            version: current_version,
            anchor: None,
            pending: Vec::new(),
            exhausted: false,
        }
    }
}

impl<I> Iterator for ReleaseGrouper<'_, I>
where
    I: Iterator<Item = ObservedCommit>,
{
    type Item = Release;

    fn next(&mut self) -> Option<Release> {
        if self.exhausted {
            return None;
        }

        let tags = self.tags;
        for observed in self.commits.by_ref() {
            if let Some(tagged) = tags.boundary(&observed.record.hash).cloned() {
                debug!(
                    version = %self.version,
                    boundary = %observed.record.short_hash(),
                    commits = self.pending.len(),
                    "closing release"
                );
                let version = mem::replace(&mut self.version, tagged);
                let anchor = self.anchor.replace(observed.record);
                return Some(Release::new(version, anchor, mem::take(&mut self.pending)));
            }

            if observed.relevant {
                self.pending.push(observed.record);
            }
        }

        self.exhausted = true;
        if self.pending.is_empty() {
            return None;
        }

        debug!(
            version = %self.version,
            commits = self.pending.len(),
            "closing oldest release"
        );
        Some(Release::new(
            self.version.clone(),
            self.anchor.take(),
            mem::take(&mut self.pending),
        ))
    }
}

/// Group a commit walk into releases, newest first
pub fn group_releases<C>(commits: C, tags: &TagMap, current_version: VersionIdentifier) -> Vec<Release>
where
    C: IntoIterator<Item = ObservedCommit>,
{
    ReleaseGrouper::new(commits, tags, current_version).collect()
}
