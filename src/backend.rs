//! Execution backends.
//!
//! Builders render a [`Statement`] and hand it to a [`Backend`]. The
//! backend is chosen by the caller when composing the application, so the
//! same builder runs against a bare [`rusqlite::Connection`], a
//! [`Session`](crate::Session), or any other implementation.

use crate::column::ColumnKind;
use crate::cursor::{ColumnMeta, Cursor};
use crate::error::Result;
use crate::statement::Statement;
use crate::value::Value;
use rusqlite::{params_from_iter, Connection};

pub trait Backend {
    /// Run a query and load every result row into `cursor`, replacing its contents.
    fn query(&self, statement: &Statement, cursor: &mut Cursor) -> Result<()>;

    /// Run an INSERT and return the new row id, or `None` when nothing was inserted.
    fn insert(&self, statement: &Statement) -> Result<Option<i64>>;

    /// Run an UPDATE or DELETE and return the number of affected rows, if reported.
    fn execute(&self, statement: &Statement) -> Result<Option<usize>>;
}

impl Backend for Connection {
    fn query(&self, statement: &Statement, cursor: &mut Cursor) -> Result<()> {
        tracing::debug!(sql = statement.sql(), params = statement.params().len(), "query");
        let mut stmt = self.prepare(statement.sql())?;
        let columns: Vec<ColumnMeta> = stmt
            .columns()
            .iter()
            .map(|c| ColumnMeta::new(c.name(), ColumnKind::from_decl_type(c.decl_type())))
            .collect();
        let width = columns.len();
        cursor.reset(columns);

        let mut rows = stmt.query(params_from_iter(statement.params()))?;
        while let Some(row) = rows.next()? {
            let values = (0..width)
                .map(|i| row.get_ref(i).map(Value::from_value_ref))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            cursor.push_row(values)?;
        }
        Ok(())
    }

    fn insert(&self, statement: &Statement) -> Result<Option<i64>> {
        tracing::debug!(sql = statement.sql(), params = statement.params().len(), "insert");
        let inserted =
            Connection::execute(self, statement.sql(), params_from_iter(statement.params()))?;
        Ok((inserted > 0).then(|| self.last_insert_rowid()))
    }

    fn execute(&self, statement: &Statement) -> Result<Option<usize>> {
        tracing::debug!(sql = statement.sql(), params = statement.params().len(), "execute");
        let affected =
            Connection::execute(self, statement.sql(), params_from_iter(statement.params()))?;
        Ok(Some(affected))
    }
}
