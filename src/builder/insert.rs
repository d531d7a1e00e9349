use super::require_table;
use crate::backend::Backend;
use crate::clause::{Clauses, SqlJoiner};
use crate::column::Column;
use crate::error::Result;
use crate::keywords::{INSERT, INTO, VALUES};
use crate::statement::Statement;
use crate::value::Value;

/// INSERT builder.
///
/// Without any value the statement renders as `INSERT INTO <table>;`, which
/// the engine rejects.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    table: Option<String>,
    values: Clauses,
}

impl InsertBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn value(mut self, column: &Column, value: impl Into<Value>) -> Self {
        self.values.push(column.clone(), value.into());
        self
    }

    pub fn create_statement(&self) -> Result<Statement> {
        let table = require_table(self.table.as_deref())?;
        let mut sql = SqlJoiner::new(INSERT);
        sql.add(INTO).add(table);
        if !self.values.is_empty() {
            sql.add(format!("({})", self.values.column_list()))
                .add(VALUES)
                .add(format!("({})", self.values.placeholder_list()));
        }
        Ok(Statement::new(sql.finish()).with_params(self.values.all_values().collect()))
    }

    /// Execute and return the generated row id, if a row was inserted
    pub fn insert<B: Backend + ?Sized>(&self, backend: &B) -> Result<Option<i64>> {
        let statement = self.create_statement()?;
        backend.insert(&statement)
    }
}
