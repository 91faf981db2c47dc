//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`FlagName`] - Validated command-line flag (`--name` or `--name=value`)
//! - [`ProjectId`] - Stable project identifier
//! - [`UtcTimestamp`] - RFC3339 timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Anything that ends up
//! on a terminal command line is checked here first, so a flag that made it
//! into a `FlagName` can be quoted and passed through without further review.
//!
//! # Examples
//!
//! ```
//! use launchdeck::core::types::FlagName;
//!
//! let flag = FlagName::new("--model=opus").unwrap();
//! assert_eq!(flag.as_str(), "--model=opus");
//!
//! assert!(FlagName::new("-v").is_err());
//! assert!(FlagName::new("--model=$(whoami)").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters that must never reach a shell command string from user input.
pub const SHELL_METACHARACTERS: &[char] = &[
    ';', '|', '&', '`', '$', '(', ')', '{', '}', '<', '>', '!', '\n', '\r',
];

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid flag: {0}")]
    InvalidFlag(String),

    #[error("invalid project id: {0}")]
    InvalidProjectId(String),
}

/// A validated command-line flag.
///
/// A flag is `--` followed by an ASCII letter, then ASCII letters, digits or
/// hyphens. An optional `=value` suffix is allowed as long as the value holds
/// no shell metacharacters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlagName(String);

impl FlagName {
    /// Create a new validated flag.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFlag` if the flag is not in the accepted form.
    pub fn new(flag: impl Into<String>) -> Result<Self, TypeError> {
        let flag = flag.into();
        Self::validate(&flag)?;
        Ok(Self(flag))
    }

    /// Check whether a string is an acceptable flag without allocating.
    pub fn is_valid(flag: &str) -> bool {
        Self::validate(flag).is_ok()
    }

    fn validate(flag: &str) -> Result<(), TypeError> {
        let Some(rest) = flag.strip_prefix("--") else {
            return Err(TypeError::InvalidFlag(format!(
                "'{flag}' must start with '--'"
            )));
        };

        let (name, value) = match rest.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (rest, None),
        };

        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => {
                return Err(TypeError::InvalidFlag(format!(
                    "'{flag}' must start with a letter after '--'"
                )))
            }
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(TypeError::InvalidFlag(format!(
                "'{flag}' may only contain letters, digits and '-'"
            )));
        }

        if let Some(value) = value {
            if value.contains(SHELL_METACHARACTERS) {
                return Err(TypeError::InvalidFlag(format!(
                    "'{flag}' has shell metacharacters in its value"
                )));
            }
        }

        Ok(())
    }

    /// Get the flag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FlagName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FlagName> for String {
    fn from(flag: FlagName) -> Self {
        flag.0
    }
}

impl AsRef<str> for FlagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FlagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a project.
///
/// New ids are random v4 UUIDs. Ids read back from storage are accepted as-is
/// provided they are non-empty and contain no whitespace, so data written by
/// older releases keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectId` if the id is empty or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidProjectId("id cannot be empty".into()));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidProjectId(format!(
                "'{id}' contains whitespace"
            )));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used in listings.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl TryFrom<String> for ProjectId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(id: ProjectId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp, serialized as RFC3339.
///
/// # Example
///
/// ```
/// use launchdeck::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(chrono::DateTime<chrono::Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }

    /// Short local-time rendering for listings.
    pub fn display_local(&self) -> String {
        self.0
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod flag_name {
        use super::*;

        #[test]
        fn plain_flags() {
            assert!(FlagName::new("--verbose").is_ok());
            assert!(FlagName::new("--dangerously-skip-permissions").is_ok());
            assert!(FlagName::new("--a1").is_ok());
        }

        #[test]
        fn flag_with_value() {
            let flag = FlagName::new("--model=opus").unwrap();
            assert_eq!(flag.as_str(), "--model=opus");
            assert!(FlagName::new("--add-dir=C:\\work\\repo").is_ok());
            assert!(FlagName::new("--empty=").is_ok());
        }

        #[test]
        fn requires_double_dash() {
            assert!(FlagName::new("verbose").is_err());
            assert!(FlagName::new("-v").is_err());
            assert!(FlagName::new("--").is_err());
        }

        #[test]
        fn name_must_start_with_letter() {
            assert!(FlagName::new("--1st").is_err());
            assert!(FlagName::new("---x").is_err());
            assert!(FlagName::new("--=value").is_err());
        }

        #[test]
        fn rejects_bad_name_chars() {
            assert!(FlagName::new("--has space").is_err());
            assert!(FlagName::new("--under_score").is_err());
            assert!(FlagName::new("--semi;colon").is_err());
        }

        #[test]
        fn rejects_metacharacters_in_value() {
            for bad in [
                "--x=a;b", "--x=a|b", "--x=a&b", "--x=`id`", "--x=$HOME", "--x=(1)",
                "--x={a}", "--x=<in", "--x=>out", "--x=!", "--x=a\nb",
            ] {
                assert!(FlagName::new(bad).is_err(), "{bad:?} should be rejected");
            }
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<FlagName, _> = serde_json::from_str("\"not-a-flag\"");
            assert!(result.is_err());
        }
    }

    mod project_id {
        use super::*;

        #[test]
        fn generated_ids_are_unique() {
            assert_ne!(ProjectId::generate(), ProjectId::generate());
        }

        #[test]
        fn short_form() {
            let id = ProjectId::new("0123456789abcdef").unwrap();
            assert_eq!(id.short(), "01234567");

            let tiny = ProjectId::new("abc").unwrap();
            assert_eq!(tiny.short(), "abc");
        }

        #[test]
        fn rejects_empty_and_whitespace() {
            assert!(ProjectId::new("").is_err());
            assert!(ProjectId::new("a b").is_err());
        }
    }

    mod utc_timestamp {
        use super::*;

        #[test]
        fn display_is_rfc3339() {
            let ts = UtcTimestamp::now();
            assert!(ts.to_string().contains('T'));
        }

        #[test]
        fn ordering_follows_time() {
            let earlier = UtcTimestamp::from_datetime(
                chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                    .unwrap()
                    .with_timezone(&chrono::Utc),
            );
            let later = UtcTimestamp::now();
            assert!(earlier < later);
        }
    }
}
