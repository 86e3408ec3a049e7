/// Normalize a repository-relative path to forward slashes without a leading `./`
pub fn normalize_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    match normalized.strip_prefix("./") {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Decides whether a changed path belongs to a component
///
/// A path matches when it lives under the component directory and is not
/// the project descriptor, which is rewritten by every version bump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    /// Directory prefix, empty or ending in `/`
    prefix: String,
    excluded_file: String,
}

impl PathFilter {
    /// # Arguments
    /// * `prefix` - Component directory relative to the repository root ("" for the root)
    /// * `excluded_file` - Repository-relative path of the project descriptor
    pub fn new(prefix: &str, excluded_file: &str) -> Self {
        let trimmed = normalize_path(prefix).trim_end_matches('/').to_string();
        let prefix = if trimmed.is_empty() || trimmed == "." {
            String::new()
        } else {
            format!("{}/", trimmed)
        };

        PathFilter {
            prefix,
            excluded_file: normalize_path(excluded_file),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn excluded_file(&self) -> &str {
        &self.excluded_file
    }

    /// Check a single changed path
    pub fn matches(&self, path: &str) -> bool {
        let path = normalize_path(path);
        path.starts_with(&self.prefix) && path != self.excluded_file
    }

    /// Check a commit's changed paths.
    ///
    /// `None` stands for a commit without exactly one parent, which is never
    /// relevant.
    pub fn is_relevant<S: AsRef<str>>(&self, changed_paths: Option<&[S]>) -> bool {
        match changed_paths {
            Some(paths) => paths.iter().any(|path| self.matches(path.as_ref())),
            None => false,
        }
    }
}
