//! Release reconstruction from commit history

pub mod path_filter;
pub mod release_analyzer;
pub mod release_grouper;

pub use path_filter::PathFilter;
pub use release_analyzer::ReleaseAnalyzer;
pub use release_grouper::{group_releases, ObservedCommit, ReleaseGrouper};
