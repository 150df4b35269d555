//! Database connection configuration.

use gn_core::dialect::Placeholder;
use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ":memory:".to_string()
}

/// Default foreign-key enforcement setting.
const fn default_foreign_keys() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Placeholder token rendered into generated SQL.
    #[serde(default)]
    pub placeholder: Placeholder,

    /// Whether to enable `PRAGMA foreign_keys` on open.
    #[serde(default = "default_foreign_keys")]
    pub foreign_keys: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            placeholder: Placeholder::default(),
            foreign_keys: default_foreign_keys(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only in memory.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
