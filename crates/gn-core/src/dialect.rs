//! Placeholder dialects for parameterized SQL.
//!
//! The builder never hardcodes a placeholder token. Each database dialect
//! spells positional parameters differently; `Placeholder` renders the token
//! for a 1-based parameter position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional placeholder style used when rendering SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// `?` (`SQLite`, ODBC, JDBC).
    Question,
    /// `?1`, `?2`, ... (`SQLite` / libSQL numbered parameters).
    #[default]
    Numbered,
    /// `%s` (`MySQL` client libraries).
    Format,
    /// `$1`, `$2`, ... (`PostgreSQL`).
    Dollar,
}

impl Placeholder {
    /// Render the token for the parameter at `position` (1-based).
    #[must_use]
    pub fn render(self, position: usize) -> String {
        match self {
            Self::Question => "?".to_string(),
            Self::Numbered => format!("?{position}"),
            Self::Format => "%s".to_string(),
            Self::Dollar => format!("${position}"),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Numbered => "numbered",
            Self::Format => "format",
            Self::Dollar => "dollar",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
