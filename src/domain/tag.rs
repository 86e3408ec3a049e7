use crate::domain::VersionIdentifier;
use crate::error::Result;
use std::collections::HashMap;
use tracing::warn;

/// A git tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Full hash of the tagged commit (annotated tags already peeled)
    pub target: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Extract the version from a component tag named `"{id}-{version}"`.
///
/// Returns `Ok(None)` when the tag does not belong to the component. A tag is
/// claimed only if the text after the prefix starts with a digit, so
/// `foo-bar-1.0.0` is not claimed by component `foo`. A claimed tag with a
/// malformed version is an error.
pub fn component_tag_version(component_id: &str, tag_name: &str) -> Result<Option<VersionIdentifier>> {
    let rest = match tag_name
        .strip_prefix(component_id)
        .and_then(|rest| rest.strip_prefix('-'))
    {
        Some(rest) => rest,
        None => return Ok(None),
    };

    if !rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }

    VersionIdentifier::parse(rest).map(Some)
}

/// Commit hash to released version, for one component
///
/// Built once per run from every tag following the `"{id}-"` convention and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    versions: HashMap<String, VersionIdentifier>,
}

impl TagMap {
    /// Collect the component's tags
    pub fn build(component_id: &str, tags: &[TagRef]) -> Result<Self> {
        let mut versions: HashMap<String, VersionIdentifier> = HashMap::new();

        for tag in tags {
            let Some(version) = component_tag_version(component_id, &tag.name)? else {
                continue;
            };

            match versions.get(&tag.target) {
                Some(existing) if *existing >= version => {
                    warn!(
                        tag = %tag.name,
                        kept = %existing,
                        "commit carries several {} tags, keeping the highest",
                        component_id
                    );
                }
                Some(existing) => {
                    warn!(
                        tag = %tag.name,
                        replaced = %existing,
                        "commit carries several {} tags, keeping the highest",
                        component_id
                    );
                    versions.insert(tag.target.clone(), version);
                }
                None => {
                    versions.insert(tag.target.clone(), version);
                }
            }
        }

        Ok(TagMap { versions })
    }

    /// Version tagged on the given commit, if any
    pub fn get(&self, hash: &str) -> Option<&VersionIdentifier> {
        self.versions.get(hash)
    }

    /// Version tagged on the commit when that tag closes a release.
    ///
    /// Pre-release ("0.x") tags never act as boundaries.
    pub fn boundary(&self, hash: &str) -> Option<&VersionIdentifier> {
        self.get(hash).filter(|version| !version.is_prerelease())
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl FromIterator<(String, VersionIdentifier)> for TagMap {
    fn from_iter<T: IntoIterator<Item = (String, VersionIdentifier)>>(iter: T) -> Self {
        TagMap {
            versions: iter.into_iter().collect(),
        }
    }
}
