use super::require_table;
use crate::backend::Backend;
use crate::clause::{Clauses, SqlJoiner};
use crate::column::Column;
use crate::error::{Error, Result};
use crate::keywords::{SET, UPDATE, WHERE};
use crate::statement::Statement;
use crate::value::Value;

/// UPDATE builder. SET values bind first, then the non-null filters.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    table: Option<String>,
    values: Clauses,
    clauses: Clauses,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set a column. A null value binds SQL NULL.
    pub fn value(mut self, column: &Column, value: impl Into<Value>) -> Self {
        self.values.push(column.clone(), value.into());
        self
    }

    /// Add an equality filter. A null value filters with `IS NULL`.
    pub fn filter(mut self, column: &Column, value: impl Into<Value>) -> Self {
        self.clauses.push(column.clone(), value.into());
        self
    }

    pub fn create_statement(&self) -> Result<Statement> {
        let table = require_table(self.table.as_deref())?;
        if self.values.is_empty() {
            return Err(Error::config(format!("no values to set on table {table}")));
        }
        let mut sql = SqlJoiner::new(UPDATE);
        sql.add(table).add(SET).add(self.values.assignments());
        if !self.clauses.is_empty() {
            sql.add(WHERE).add(self.clauses.conjunction());
        }
        let params = self
            .values
            .all_values()
            .chain(self.clauses.filter_values())
            .collect();
        Ok(Statement::new(sql.finish()).with_params(params))
    }

    /// Execute and return the number of rows changed
    pub fn update<B: Backend + ?Sized>(&self, backend: &B) -> Result<Option<usize>> {
        let statement = self.create_statement()?;
        backend.execute(&statement)
    }
}
