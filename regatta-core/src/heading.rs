//! Points of sail recognised by the school.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RegattaError, Result};

/// A vessel's sailing angle relative to the wind.
///
/// The vocabulary is closed: only these two headings are taught.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heading {
    /// Sailing as close to the wind as the rig allows.
    CloseHauled,
    /// Sailing with the wind from astern.
    Running,
}

impl Heading {
    /// Every recognised heading.
    pub const ALL: [Heading; 2] = [Heading::CloseHauled, Heading::Running];

    /// Canonical text form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloseHauled => "close-hauled",
            Self::Running => "running",
        }
    }

    /// Parse heading text, rejecting empty and unknown values.
    pub(crate) fn parse(value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(RegattaError::empty("heading"));
        }
        value.parse()
    }
}

impl FromStr for Heading {
    type Err = RegattaError;

    fn from_str(value: &str) -> Result<Self> {
        Heading::ALL
            .into_iter()
            .find(|heading| heading.as_str() == value)
            .ok_or_else(|| {
                RegattaError::InvalidArgument(format!(
                    "unknown heading `{value}`, expected `close-hauled` or `running`"
                ))
            })
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
