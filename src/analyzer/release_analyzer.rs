use crate::analyzer::path_filter::PathFilter;
use crate::analyzer::release_grouper::{group_releases, ObservedCommit};
use crate::domain::{Release, TagMap, VersionIdentifier};
use crate::error::Result;
use crate::git::Repository;
use tracing::{debug, info};

/// Reconstructs one component's releases from repository history
pub struct ReleaseAnalyzer {
    component_id: String,
    filter: PathFilter,
}

impl ReleaseAnalyzer {
    /// Create a new release analyzer
    pub fn new(component_id: impl Into<String>, filter: PathFilter) -> Self {
        ReleaseAnalyzer {
            component_id: component_id.into(),
            filter,
        }
    }

    /// Walk HEAD once and decide each commit's relevance
    pub fn observe<R: Repository>(&self, repo: &R) -> Result<Vec<ObservedCommit>> {
        let mut observed = Vec::new();

        for record in repo.head_commits()? {
            let changed = repo.changed_paths(&record.hash)?;
            let relevant = self.filter.is_relevant(changed.as_deref());
            if changed.is_none() {
                debug!(commit = %record.short_hash(), "skipping commit without a single parent");
            }
            observed.push(ObservedCommit::new(record, relevant));
        }

        Ok(observed)
    }

    /// Group the component's history into releases, newest first
    ///
    /// Fails on the first malformed component tag.
    pub fn analyze<R: Repository>(
        &self,
        repo: &R,
        current_version: VersionIdentifier,
    ) -> Result<Vec<Release>> {
        let tags = TagMap::build(&self.component_id, &repo.tags()?)?;
        let observed = self.observe(repo)?;

        info!(
            component = %self.component_id,
            commits = observed.len(),
            tags = tags.len(),
            "grouping history"
        );

        Ok(group_releases(observed, &tags, current_version))
    }
}
