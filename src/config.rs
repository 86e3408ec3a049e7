use crate::analyzer::path_filter::{normalize_path, PathFilter};
use crate::changelog::{has_title, EntryFormat};
use crate::domain::VersionIdentifier;
use crate::error::{ChronicleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Placeholder replaced by the component id in file name patterns
const ID_PLACEHOLDER: &str = "{id}";

/// Represents the complete configuration for git-chronicle.
///
/// Contains the component catalog and the defaults applied to every component.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub components: BTreeMap<String, ComponentConfig>,
}

/// Returns the default changelog file name.
fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

/// Returns the default project descriptor pattern.
fn default_descriptor() -> String {
    "{id}.csproj".to_string()
}

/// Returns the default title line for new changelogs.
fn default_title() -> String {
    "# {id} Changelog".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings shared by all components unless overridden.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DefaultsConfig {
    /// Changelog file name inside the component directory
    #[serde(default = "default_changelog")]
    pub changelog: String,

    /// Project descriptor file name, `{id}` is substituted
    #[serde(default = "default_descriptor")]
    pub descriptor: String,

    /// Title line of a freshly created changelog, `{id}` is substituted
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_true")]
    pub show_hash: bool,

    #[serde(default)]
    pub show_date: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            changelog: default_changelog(),
            descriptor: default_descriptor(),
            title: default_title(),
            show_hash: true,
            show_date: false,
        }
    }
}

/// One catalog entry.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComponentConfig {
    /// Currently declared version
    pub version: String,

    /// Component directory relative to the repository root
    pub path: String,

    #[serde(default)]
    pub descriptor: Option<String>,

    #[serde(default)]
    pub changelog: Option<String>,
}

/// A catalog entry with defaults applied and its version parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub id: String,
    pub version: VersionIdentifier,
    /// Directory relative to the repository root, forward slashes, no trailing slash
    pub directory: String,
    /// Repository-relative path of the project descriptor
    pub descriptor_path: String,
    /// Repository-relative path of the changelog
    pub changelog_path: String,
    /// Title line used when the changelog has to be created
    pub title: String,
}

impl ComponentSpec {
    /// Change-detection predicate for this component
    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(&self.directory, &self.descriptor_path)
    }
}

fn join_relative(directory: &str, file: &str) -> String {
    if directory.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", directory, file)
    }
}

impl Config {
    /// Resolve a component id against the catalog.
    ///
    /// # Returns
    /// * `Ok(ComponentSpec)` - Entry with defaults applied
    /// * `Err` - If the id is unknown, its version is malformed or the
    ///   changelog title is not a `# ` heading
    pub fn component(&self, id: &str) -> Result<ComponentSpec> {
        let entry = self
            .components
            .get(id)
            .ok_or_else(|| ChronicleError::component(id))?;

        let version = VersionIdentifier::parse(&entry.version).map_err(|e| {
            ChronicleError::version(format!("component '{}' declares an invalid version: {}", id, e))
        })?;

        let directory = normalize_path(&entry.path)
            .trim_end_matches('/')
            .trim_start_matches("./")
            .to_string();
        let directory = if directory == "." { String::new() } else { directory };

        let descriptor = entry
            .descriptor
            .as_deref()
            .unwrap_or(&self.defaults.descriptor)
            .replace(ID_PLACEHOLDER, id);
        let changelog = entry
            .changelog
            .as_deref()
            .unwrap_or(&self.defaults.changelog)
            .replace(ID_PLACEHOLDER, id);

        let title = self.defaults.title.replace(ID_PLACEHOLDER, id);
        if !has_title(&title) {
            return Err(ChronicleError::config(format!(
                "changelog title for '{}' must start with '# ', got '{}'",
                id, title
            )));
        }

        Ok(ComponentSpec {
            id: id.to_string(),
            version,
            descriptor_path: join_relative(&directory, &descriptor),
            changelog_path: join_relative(&directory, &changelog),
            directory,
            title,
        })
    }

    /// Catalog ids in sorted order
    pub fn component_ids(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Rendering options for synthesized sections
    pub fn entry_format(&self) -> EntryFormat {
        EntryFormat {
            show_hash: self.defaults.show_hash,
            show_date: self.defaults.show_date,
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `chronicle.toml` in current directory
/// 3. `.chronicle.toml` in the user config directory
/// 4. Default configuration (empty catalog) if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./chronicle.toml").exists() {
        fs::read_to_string("./chronicle.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".chronicle.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
