//! Domain values - versions, commits, tags and releases

pub mod commit;
pub mod release;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use release::Release;
pub use tag::{component_tag_version, TagMap, TagRef};
pub use version::VersionIdentifier;
