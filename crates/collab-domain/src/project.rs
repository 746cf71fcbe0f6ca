//! Project listing types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle label of a project. Any label may change to any other; no transitions
/// are enforced.
///
/// Wire and storage format: kebab-case string (`"in-progress"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Completed,
    LookingForMembers,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status: {0}")]
pub struct UnknownStatus(pub String);

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        Self::Planning,
        Self::InProgress,
        Self::Completed,
        Self::LookingForMembers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::LookingForMembers => "looking-for-members",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}
