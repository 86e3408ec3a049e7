//! Changelog document model.
//!
//! A changelog is a title block followed by `## ` sections. Sections whose
//! heading starts with a version are keyed by that version; everything else
//! is carried through untouched. Merging only ever inserts sections for
//! versions that are not present yet, so hand edits survive every run.

use crate::domain::{Release, VersionIdentifier};
use crate::error::{ChronicleError, Result};
use regex::Regex;
use std::fmt::{self, Write as _};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    // "## 1.2.0", "## [1.2.0] - 2024-01-01", "## Unreleased"
    HEADING.get_or_init(|| Regex::new(r"^##[ \t]+\[?([^\]\s]+)\]?").expect("heading regex is valid"))
}

/// How synthesized sections are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryFormat {
    /// Append the abbreviated commit hash to each bullet
    pub show_hash: bool,
    /// Append the anchor commit's date to the heading
    pub show_date: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    Release {
        version: VersionIdentifier,
        text: String,
    },
    Verbatim {
        text: String,
    },
}

impl Section {
    fn text(&self) -> &str {
        match self {
            Section::Release { text, .. } | Section::Verbatim { text } => text,
        }
    }

    fn version(&self) -> Option<&VersionIdentifier> {
        match self {
            Section::Release { version, .. } => Some(version),
            Section::Verbatim { .. } => None,
        }
    }

    fn from_heading(heading: &str) -> Result<Self> {
        let token = heading_regex()
            .captures(heading)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .unwrap_or("");

        if token.starts_with(|c: char| c.is_ascii_digit()) {
            let version = VersionIdentifier::parse(token).map_err(|e| {
                ChronicleError::changelog(format!("bad section heading '{}': {}", heading.trim_end(), e))
            })?;
            Ok(Section::Release {
                version,
                text: heading.to_string(),
            })
        } else {
            Ok(Section::Verbatim {
                text: heading.to_string(),
            })
        }
    }

    fn push_line(&mut self, line: &str) {
        match self {
            Section::Release { text, .. } | Section::Verbatim { text } => text.push_str(line),
        }
    }
}

/// A changelog held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDocument {
    /// Title line and anything else before the first section
    preamble: String,
    sections: Vec<Section>,
}

/// First non-blank line of `text`, without trailing whitespace
fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim_end).find(|line| !line.is_empty())
}

fn is_title(line: &str) -> bool {
    line.starts_with("# ")
}

/// Whether `text` opens with the `# ` title line every document needs
pub fn has_title(text: &str) -> bool {
    first_line(text).is_some_and(is_title)
}

impl HistoryDocument {
    /// Minimal document for a component without a changelog yet
    pub fn stub(title: &str) -> Self {
        HistoryDocument {
            preamble: format!("{}\n\n", title.trim_end()),
            sections: Vec::new(),
        }
    }

    /// Parse changelog text.
    ///
    /// # Errors
    /// * When the first non-blank line is not a `# ` title
    /// * When a section heading starts with a digit but is not a valid version
    pub fn parse(text: &str) -> Result<Self> {
        match first_line(text) {
            Some(line) if is_title(line) => {}
            Some(line) => {
                return Err(ChronicleError::changelog(format!(
                    "expected a '# ' title line, found '{}'",
                    line
                )))
            }
            None => return Err(ChronicleError::changelog("document is empty")),
        }

        let mut preamble = String::new();
        let mut sections: Vec<Section> = Vec::new();

        for line in text.split_inclusive('\n') {
            if heading_regex().is_match(line) {
                sections.push(Section::from_heading(line)?);
            } else if let Some(current) = sections.last_mut() {
                current.push_line(line);
            } else {
                preamble.push_str(line);
            }
        }

        Ok(HistoryDocument { preamble, sections })
    }

    /// Read and parse a changelog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Read a changelog, or start from a stub when the file does not exist
    pub fn load_or_stub<P: AsRef<Path>>(path: P, title: &str) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::stub(title)),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite `path` with the rendered document
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Whether a section for `version` already exists
    pub fn contains(&self, version: &VersionIdentifier) -> bool {
        self.sections.iter().any(|s| s.version() == Some(version))
    }

    /// Versions of all release sections, top to bottom
    pub fn versions(&self) -> Vec<&VersionIdentifier> {
        self.sections.iter().filter_map(Section::version).collect()
    }

    /// Insert sections for releases whose version is not present yet.
    ///
    /// `releases` is expected newest first, as produced by the grouping
    /// engine. They are applied oldest first, each at the top, so the result
    /// reads newest to oldest. Existing sections are never modified, removed
    /// or reordered, and releases without commits are skipped.
    ///
    /// Returns the number of sections inserted.
    pub fn merge_releases(&mut self, releases: &[Release], format: EntryFormat) -> usize {
        let mut inserted = 0;

        for release in releases.iter().rev() {
            if release.is_empty() || self.contains(&release.version) {
                continue;
            }

            if inserted == 0 {
                self.separate_preamble();
            }
            self.sections.insert(
                0,
                Section::Release {
                    version: release.version.clone(),
                    text: render_release(release, format),
                },
            );
            inserted += 1;
        }

        inserted
    }

    /// Make sure an inserted section starts on its own line after a blank line
    fn separate_preamble(&mut self) {
        if !self.preamble.ends_with('\n') {
            self.preamble.push('\n');
        }
        if !self.preamble.ends_with("\n\n") {
            self.preamble.push('\n');
        }
    }
}

impl fmt::Display for HistoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preamble)?;
        for section in &self.sections {
            f.write_str(section.text())?;
        }
        Ok(())
    }
}

/// Render one release as a changelog section
pub fn render_release(release: &Release, format: EntryFormat) -> String {
    let mut text = String::new();

    let _ = write!(text, "## {}", release.version);
    if format.show_date {
        if let Some(anchor) = &release.anchor {
            let _ = write!(text, " - {}", anchor.timestamp.format("%Y-%m-%d"));
        }
    }
    text.push_str("\n\n");

    for commit in &release.commits {
        let summary = match commit.summary() {
            "" => "(no message)",
            summary => summary,
        };
        if format.show_hash {
            let _ = writeln!(text, "- {} ({})", summary, commit.short_hash());
        } else {
            let _ = writeln!(text, "- {}", summary);
        }
    }
    text.push('\n');

    text
}
