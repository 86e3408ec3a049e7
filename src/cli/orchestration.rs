//! Changelog update workflow
//!
//! Drives the per-component pipeline: resolve the catalog entry, reconstruct
//! releases from history, merge them into the changelog and write it back.
//! Components are processed one after another and the first failure stops
//! the batch.

use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzer::ReleaseAnalyzer;
use crate::changelog::HistoryDocument;
use crate::config::Config;
use crate::error::ChronicleError;
use crate::git::{Git2Repository, Repository};

/// Arguments for the update workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateWorkflowArgs {
    /// Any path inside the repository; the work tree root is discovered from it
    /// (the current directory when absent)
    pub root: Option<PathBuf>,

    /// Component ids to process
    pub components: Vec<String>,

    /// Process every catalog component
    pub all: bool,

    /// Compute without writing
    pub dry_run: bool,
}

/// What happened to one component
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentOutcome {
    /// The component directory is gone, nothing was written
    Deleted { id: String },
    /// The changelog was written
    Updated {
        id: String,
        changelog: String,
        sections_added: usize,
    },
    /// Every release is already present
    UpToDate { id: String },
    /// Dry run: the document that would have been written
    Preview {
        id: String,
        changelog: String,
        sections_added: usize,
        document: String,
    },
}

impl ComponentOutcome {
    pub fn id(&self) -> &str {
        match self {
            ComponentOutcome::Deleted { id }
            | ComponentOutcome::Updated { id, .. }
            | ComponentOutcome::UpToDate { id }
            | ComponentOutcome::Preview { id, .. } => id,
        }
    }
}

impl fmt::Display for ComponentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentOutcome::Deleted { id } => write!(f, "{}: deleted, no history required", id),
            ComponentOutcome::Updated { id, changelog, .. } => write!(f, "{}: updated {}", id, changelog),
            ComponentOutcome::UpToDate { id } => write!(f, "{}: up to date", id),
            ComponentOutcome::Preview {
                id,
                changelog,
                sections_added,
                ..
            } => write!(
                f,
                "{}: would update {} ({} new section(s))",
                id, changelog, sections_added
            ),
        }
    }
}

/// Find the working directory of the repository containing `start`
pub fn resolve_root(start: &Path) -> Result<PathBuf> {
    let repo = Git2Repository::open(start)
        .with_context(|| format!("Not in a git repository: {}", start.display()))?;
    match repo.workdir() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => bail!("Repository at {} has no working directory", start.display()),
    }
}

/// Update the changelog of a single component
///
/// `open_repo` is called with the repository root and the handle it returns
/// is dropped as soon as the releases have been computed.
pub fn process_component<R, F>(
    root: &Path,
    config: &Config,
    id: &str,
    dry_run: bool,
    open_repo: F,
) -> Result<ComponentOutcome>
where
    R: Repository,
    F: FnOnce(&Path) -> crate::error::Result<R>,
{
    let spec = config.component(id)?;

    if !root.join(&spec.directory).is_dir() {
        info!(component = id, directory = %spec.directory, "component directory is gone");
        return Ok(ComponentOutcome::Deleted { id: id.to_string() });
    }

    let releases = {
        let repo = open_repo(root).with_context(|| format!("Failed to open repository for '{}'", id))?;
        ReleaseAnalyzer::new(&spec.id, spec.path_filter())
            .analyze(&repo, spec.version.clone())
            .with_context(|| format!("Failed to read history of '{}'", id))?
    };

    let path = root.join(&spec.changelog_path);
    let existed = path.exists();
    let mut document = HistoryDocument::load_or_stub(&path, &spec.title)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let sections_added = document.merge_releases(&releases, config.entry_format());

    info!(
        component = id,
        releases = releases.len(),
        sections_added,
        "merged history"
    );

    if dry_run {
        return Ok(ComponentOutcome::Preview {
            id: id.to_string(),
            changelog: spec.changelog_path,
            sections_added,
            document: document.to_string(),
        });
    }

    if existed && sections_added == 0 {
        return Ok(ComponentOutcome::UpToDate { id: id.to_string() });
    }

    document
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ComponentOutcome::Updated {
        id: id.to_string(),
        changelog: spec.changelog_path,
        sections_added,
    })
}

/// Main update workflow
///
/// Orchestrates the batch:
/// 1. Resolve the work tree root from `args.root` or the current directory
/// 2. Select the components to process
/// 3. Process each component in turn, reporting its outcome
///
/// # Arguments
///
/// * `args` - Workflow arguments (root, components, all, dry_run)
/// * `config` - Loaded component catalog
/// * `report` - Called with each outcome as soon as it is known
///
/// # Returns
///
/// All outcomes in processing order, or the first error
pub fn run_update_workflow<F>(
    args: &UpdateWorkflowArgs,
    config: &Config,
    mut report: F,
) -> Result<Vec<ComponentOutcome>>
where
    F: FnMut(&ComponentOutcome),
{
    let root = resolve_root(args.root.as_deref().unwrap_or(Path::new(".")))?;

    let ids: Vec<String> = if args.all {
        config.component_ids().into_iter().map(str::to_string).collect()
    } else {
        args.components.clone()
    };

    if ids.is_empty() {
        bail!(ChronicleError::config(
            "no components selected; name component ids or pass --all"
        ));
    }

    let mut outcomes = Vec::with_capacity(ids.len());
    for id in &ids {
        let outcome = process_component(&root, config, id, args.dry_run, |root| {
            Git2Repository::open(root)
        })?;
        report(&outcome);
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentConfig;
    use crate::git::MockRepository;
    use std::fs;
    use tempfile::TempDir;

    fn config() -> Config {
        let mut config = Config::default();
        config.defaults.show_hash = false;
        config.components.insert(
            "pkg".to_string(),
            ComponentConfig {
                version: "1.3.0".to_string(),
                path: "src/pkg".to_string(),
                descriptor: None,
                changelog: None,
            },
        );
        config
    }

    fn history() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.commit("c1", "Add parser", &["src/pkg/parser.cs"]);
        let tagged = repo.commit("c2", "Release", &["src/pkg/pkg.csproj"]);
        repo.commit("c3", "Fix parser", &["src/pkg/parser.cs"]);
        repo.add_tag("pkg-1.2.0", tagged);
        repo
    }

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/pkg")).unwrap();
        dir
    }

    #[test]
    fn test_creates_changelog_from_stub() {
        let dir = workspace();
        let outcome =
            process_component(dir.path(), &config(), "pkg", false, |_| Ok(history())).unwrap();

        assert_eq!(
            outcome,
            ComponentOutcome::Updated {
                id: "pkg".to_string(),
                changelog: "src/pkg/CHANGELOG.md".to_string(),
                sections_added: 2,
            }
        );
        let written = fs::read_to_string(dir.path().join("src/pkg/CHANGELOG.md")).unwrap();
        assert_eq!(
            written,
            "# pkg Changelog\n\n## 1.3.0\n\n- Fix parser\n\n## 1.2.0\n\n- Add parser\n\n"
        );
    }

    #[test]
    fn test_second_run_is_up_to_date() {
        let dir = workspace();
        process_component(dir.path(), &config(), "pkg", false, |_| Ok(history())).unwrap();
        let first = fs::read_to_string(dir.path().join("src/pkg/CHANGELOG.md")).unwrap();

        let outcome =
            process_component(dir.path(), &config(), "pkg", false, |_| Ok(history())).unwrap();
        assert_eq!(outcome, ComponentOutcome::UpToDate { id: "pkg".to_string() });

        let second = fs::read_to_string(dir.path().join("src/pkg/CHANGELOG.md")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_deleted_component_is_skipped() {
        let dir = TempDir::new().unwrap();
        let outcome = process_component(dir.path(), &config(), "pkg", false, |_| {
            Ok(MockRepository::new())
        })
        .unwrap();

        assert_eq!(outcome, ComponentOutcome::Deleted { id: "pkg".to_string() });
        assert_eq!(outcome.to_string(), "pkg: deleted, no history required");
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = workspace();
        let outcome =
            process_component(dir.path(), &config(), "pkg", true, |_| Ok(history())).unwrap();

        match outcome {
            ComponentOutcome::Preview {
                sections_added,
                document,
                ..
            } => {
                assert_eq!(sections_added, 2);
                assert!(document.contains("## 1.2.0"));
            }
            other => panic!("expected preview, got {:?}", other),
        }
        assert!(!dir.path().join("src/pkg/CHANGELOG.md").exists());
    }

    #[test]
    fn test_unknown_component_fails() {
        let dir = workspace();
        let result = process_component(dir.path(), &config(), "nope", false, |_| {
            Ok(MockRepository::new())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_changelog_fails() {
        let dir = workspace();
        fs::write(dir.path().join("src/pkg/CHANGELOG.md"), "no title here\n").unwrap();

        let result = process_component(dir.path(), &config(), "pkg", false, |_| Ok(history()));
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_lines() {
        let updated = ComponentOutcome::Updated {
            id: "pkg".to_string(),
            changelog: "src/pkg/CHANGELOG.md".to_string(),
            sections_added: 1,
        };
        assert_eq!(updated.to_string(), "pkg: updated src/pkg/CHANGELOG.md");
        assert_eq!(updated.id(), "pkg");
    }
}
