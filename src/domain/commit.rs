use chrono::{DateTime, Utc};

/// Length of abbreviated commit hashes shown in changelog bullets
pub const SHORT_HASH_LEN: usize = 7;

/// Snapshot of a single commit, used as a history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    /// Author name
    pub author: String,
}

impl CommitRecord {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
        author: impl Into<String>,
    ) -> Self {
        CommitRecord {
            hash: hash.into(),
            message: message.into(),
            timestamp,
            author: author.into(),
        }
    }

    /// Abbreviated hash (first 7 characters)
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(SHORT_HASH_LEN) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }

    /// First non-blank line of the message, trimmed
    pub fn summary(&self) -> &str {
        self.message
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str, message: &str) -> CommitRecord {
        CommitRecord::new(hash, message, DateTime::from_timestamp(0, 0).unwrap(), "Test User")
    }

    #[test]
    fn test_short_hash() {
        let commit = record("abc1234def5678", "msg");
        assert_eq!(commit.short_hash(), "abc1234");
    }

    #[test]
    fn test_short_hash_of_short_input() {
        let commit = record("abc", "msg");
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn test_summary_uses_first_line() {
        let commit = record("abc", "Fix parser crash\n\nLonger explanation here.");
        assert_eq!(commit.summary(), "Fix parser crash");
    }

    #[test]
    fn test_summary_skips_leading_blank_lines() {
        let commit = record("abc", "\n   \n  Add widget  \n");
        assert_eq!(commit.summary(), "Add widget");
    }

    #[test]
    fn test_summary_of_empty_message() {
        assert_eq!(record("abc", "").summary(), "");
    }
}
