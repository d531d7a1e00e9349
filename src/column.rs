use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared SQL kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Real,
    Boolean,
    Text,
    /// Anything without a dedicated typed accessor (BLOB, NUMERIC, expressions)
    Other,
}

impl ColumnKind {
    /// Derive the kind from a SQLite declared column type.
    ///
    /// Follows SQLite's affinity rules, with `BOOL` checked first so that
    /// `BOOLEAN` columns are not mistaken for integers.
    pub fn from_decl_type(decl_type: Option<&str>) -> Self {
        let Some(decl) = decl_type else {
            return ColumnKind::Other;
        };
        let decl = decl.to_ascii_uppercase();
        if decl.contains("BOOL") {
            ColumnKind::Boolean
        } else if decl.contains("INT") {
            ColumnKind::Integer
        } else if decl.contains("CHAR") || decl.contains("CLOB") || decl.contains("TEXT") {
            ColumnKind::Text
        } else if decl.contains("REAL") || decl.contains("FLOA") || decl.contains("DOUB") {
            ColumnKind::Real
        } else {
            ColumnKind::Other
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Integer => "INTEGER",
            ColumnKind::Real => "REAL",
            ColumnKind::Boolean => "BOOLEAN",
            ColumnKind::Text => "TEXT",
            ColumnKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// A table column: its exact name and declared kind.
///
/// Names are emitted verbatim into SQL. They are case-sensitive and never
/// quoted or escaped, so they must match the table definition exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Integer)
    }

    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Real)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Boolean)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }
}
