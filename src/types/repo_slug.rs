// ABOUTME: Validated `owner/name` repository slug.
// ABOUTME: Ensures both halves follow GitHub's account and repository naming rules.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoSlugError {
    #[error("repository cannot be empty")]
    Empty,

    #[error("repository must have the form owner/name")]
    MissingSeparator,

    #[error("repository owner cannot be empty")]
    EmptyOwner,

    #[error("repository name cannot be empty")]
    EmptyName,

    #[error("invalid character in repository: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    pub fn new(value: &str) -> Result<Self, RepoSlugError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(RepoSlugError::Empty);
        }

        let (owner, name) = value
            .split_once('/')
            .ok_or(RepoSlugError::MissingSeparator)?;

        if owner.is_empty() {
            return Err(RepoSlugError::EmptyOwner);
        }
        if name.is_empty() {
            return Err(RepoSlugError::EmptyName);
        }

        // Owners: alphanumeric and hyphen. Names additionally allow '_' and '.'.
        for c in owner.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(RepoSlugError::InvalidChar(c));
            }
        }
        for c in name.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(RepoSlugError::InvalidChar(c));
            }
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoSlug {
    type Err = RepoSlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
