//! Name predicates for file names and map keys

use std::fmt;

/// Matches a candidate name against a fixed literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatcher {
    /// Candidate must equal the literal.
    Exact(String),
    /// Candidate must start with the literal.
    Prefix(String),
}

impl NameMatcher {
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Exact(name) => candidate == name,
            Self::Prefix(prefix) => candidate.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for NameMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{}", name),
            Self::Prefix(prefix) => write!(f, "{}*", prefix),
        }
    }
}
