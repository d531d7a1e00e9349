use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File name that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Database session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file name, or `:memory:`
    pub name: String,
    /// Schema version stored in `PRAGMA user_version`; must be at least 1
    pub version: u32,
    /// Directory holding the database file. Created if missing.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// SQL batch run when the database is first created
    #[serde(default)]
    pub on_create: Option<String>,
    /// SQL batch run when the stored version is older than `version`
    #[serde(default)]
    pub on_upgrade: Option<String>,
}

impl DatabaseConfig {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
            path: None,
            on_create: None,
            on_upgrade: None,
        }
    }

    pub fn in_memory(version: u32) -> Self {
        Self::new(IN_MEMORY, version)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_on_create(mut self, sql: impl Into<String>) -> Self {
        self.on_create = Some(sql.into());
        self
    }

    pub fn with_on_upgrade(mut self, sql: impl Into<String>) -> Self {
        self.on_upgrade = Some(sql.into());
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.name == IN_MEMORY
    }
}
