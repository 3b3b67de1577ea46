// Common types used across multiple domains and layers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two editors working the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    #[default]
    Dan,
    Stephen,
}

impl Editor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Editor::Dan => "dan",
            Editor::Stephen => "stephen",
        }
    }

    /// Full name used in notifications
    pub fn display_name(&self) -> &'static str {
        match self {
            Editor::Dan => "Dan Harrison",
            Editor::Stephen => "Stephen Ackroyd",
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Editor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dan" => Ok(Editor::Dan),
            "stephen" => Ok(Editor::Stephen),
            other => Err(format!("unknown editor: {}", other)),
        }
    }
}
