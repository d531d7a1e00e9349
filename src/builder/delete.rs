use super::require_table;
use crate::backend::Backend;
use crate::clause::{Clauses, SqlJoiner};
use crate::column::Column;
use crate::error::Result;
use crate::keywords::{DELETE, FROM, WHERE};
use crate::statement::Statement;
use crate::value::Value;

/// DELETE builder.
///
/// `WHERE` is always rendered. Without filters the statement is
/// `DELETE FROM <table> WHERE ;`, which the engine refuses, so a whole
/// table is never emptied by a builder that forgot its filters.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: Option<String>,
    clauses: Clauses,
}

impl DeleteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add an equality filter. A null value filters with `IS NULL`.
    pub fn filter(mut self, column: &Column, value: impl Into<Value>) -> Self {
        self.clauses.push(column.clone(), value.into());
        self
    }

    pub fn create_statement(&self) -> Result<Statement> {
        let table = require_table(self.table.as_deref())?;
        let mut sql = SqlJoiner::new(DELETE);
        sql.add(FROM)
            .add(table)
            .add(WHERE)
            .add(self.clauses.conjunction());
        Ok(Statement::new(sql.finish()).with_params(self.clauses.filter_values().collect()))
    }

    /// Execute and return the number of rows removed
    pub fn delete<B: Backend + ?Sized>(&self, backend: &B) -> Result<Option<usize>> {
        let statement = self.create_statement()?;
        backend.execute(&statement)
    }
}
