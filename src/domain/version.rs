use crate::error::{ChronicleError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest number of dot-separated components accepted (major.minor.patch.build)
const MAX_COMPONENTS: usize = 4;

/// Dotted numeric version such as "2.10.0" or "1.4.0.7"
///
/// Comparison is lexicographic over the numeric components, with the shorter
/// sequence padded by zeros, so "1.2" and "1.2.0" are equal. Display joins
/// the parsed components as given, so the component count is kept and
/// leading zeros are dropped ("01.2" prints as "1.2").
#[derive(Debug, Clone)]
pub struct VersionIdentifier {
    parts: Vec<u64>,
}

impl VersionIdentifier {
    /// Parse a version string, rejecting anything that is not fully numeric
    pub fn parse(input: &str) -> Result<Self> {
        input.parse()
    }

    /// Leading component
    pub fn major(&self) -> u64 {
        self.parts.first().copied().unwrap_or(0)
    }

    /// Versions with a leading zero ("0.x") are pre-stable bootstrap versions
    pub fn is_prerelease(&self) -> bool {
        self.major() == 0
    }

    pub fn components(&self) -> &[u64] {
        &self.parts
    }

    fn component(&self, index: usize) -> u64 {
        self.parts.get(index).copied().unwrap_or(0)
    }

    /// Components with trailing zeros removed; equal versions share this form
    fn significant(&self) -> &[u64] {
        let len = self
            .parts
            .iter()
            .rposition(|&part| part != 0)
            .map_or(0, |pos| pos + 1);
        &self.parts[..len]
    }
}

impl FromStr for VersionIdentifier {
    type Err = ChronicleError;

    fn from_str(s: &str) -> Result<Self> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() > MAX_COMPONENTS {
            return Err(ChronicleError::version(format!(
                "Invalid version format: '{}' - at most {} components allowed",
                s, MAX_COMPONENTS
            )));
        }

        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ChronicleError::version(format!(
                    "Invalid version format: '{}' - component '{}' is not a number",
                    s, segment
                )));
            }
            let value = segment.parse::<u64>().map_err(|_| {
                ChronicleError::version(format!("Version component out of range: {}", segment))
            })?;
            parts.push(value);
        }

        Ok(VersionIdentifier { parts })
    }
}

impl PartialEq for VersionIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionIdentifier {}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl Hash for VersionIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}
