//! Ordered clause lists shared by the builders, and the text joiner they render with.

use crate::column::Column;
use crate::keywords::{AND, IS_NULL, PLACEHOLDER};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Asc,
    Desc,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Asc => f.write_str("ASC"),
            OrderType::Desc => f.write_str("DESC"),
        }
    }
}

/// Insertion-ordered `(Column, Value)` pairs.
///
/// Used both for filters and for INSERT/UPDATE value lists. Pushing a column
/// that is already present replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clauses {
    entries: Vec<(Column, Value)>,
}

impl Clauses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, column: Column, value: Value) {
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Column, Value)> {
        self.entries.iter()
    }

    /// Column names joined with `", "`
    pub fn column_list(&self) -> String {
        self.entries
            .iter()
            .map(|(c, _)| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One `?` per entry joined with `", "`
    pub fn placeholder_list(&self) -> String {
        vec![PLACEHOLDER; self.entries.len()].join(", ")
    }

    /// `a = ?, b = ?` for a SET list; every entry binds, NULL included
    pub fn assignments(&self) -> String {
        self.entries
            .iter()
            .map(|(c, _)| format!("{} = {}", c.name(), PLACEHOLDER))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `a = ? AND b IS NULL` for a WHERE clause
    pub fn conjunction(&self) -> String {
        self.entries
            .iter()
            .map(|(c, v)| {
                if v.is_null() {
                    format!("{} {}", c.name(), IS_NULL)
                } else {
                    format!("{} = {}", c.name(), PLACEHOLDER)
                }
            })
            .collect::<Vec<_>>()
            .join(&format!(" {AND} "))
    }

    /// Every value, in order
    pub fn all_values(&self) -> impl Iterator<Item = Value> + '_ {
        self.entries.iter().map(|(_, v)| v.clone())
    }

    /// Values that render a placeholder in a WHERE clause
    pub fn filter_values(&self) -> impl Iterator<Item = Value> + '_ {
        self.all_values().filter(|v| !v.is_null())
    }
}

/// Insertion-ordered `ORDER BY` terms keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ordering {
    terms: Vec<(String, Option<OrderType>)>,
}

impl Ordering {
    pub fn push(&mut self, column: &Column, direction: Option<OrderType>) {
        match self.terms.iter_mut().find(|(name, _)| name == column.name()) {
            Some(term) => term.1 = direction,
            None => self.terms.push((column.name().to_string(), direction)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn render(&self) -> String {
        self.terms
            .iter()
            .map(|(name, direction)| match direction {
                Some(d) => format!("{name} {d}"),
                None => name.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Space-separated statement text with a leading keyword and a closing `;`.
pub(crate) struct SqlJoiner {
    parts: Vec<String>,
}

impl SqlJoiner {
    pub(crate) fn new(keyword: &str) -> Self {
        Self {
            parts: vec![keyword.to_string()],
        }
    }

    pub(crate) fn add(&mut self, part: impl Into<String>) -> &mut Self {
        self.parts.push(part.into());
        self
    }

    pub(crate) fn finish(&self) -> String {
        format!("{};", self.parts.join(" "))
    }
}
