use super::require_table;
use crate::backend::Backend;
use crate::clause::{Clauses, OrderType, Ordering, SqlJoiner};
use crate::column::Column;
use crate::cursor::{Cursor, Row};
use crate::error::Result;
use crate::keywords::{ALL_COLUMNS, FROM, GROUP_BY, ORDER_BY, SELECT, WHERE};
use crate::mapper::{FieldMapper, ResultMapper};
use crate::statement::Statement;
use crate::value::Value;

/// SELECT builder whose rows map to `T`.
///
/// ```
/// use rust_sqlite_builder::{Column, OrderType, SelectBuilder};
///
/// let id = Column::integer("id");
/// let name = Column::text("name");
/// let select = SelectBuilder::from_fn(|row| row.get::<i64>(0))
///     .table("users")
///     .select(&id)
///     .filter(&name, "Ann")
///     .order_by(&id, OrderType::Asc);
///
/// let statement = select.create_statement().unwrap();
/// assert_eq!(statement.sql(), "SELECT id FROM users WHERE name = ? ORDER BY id ASC;");
/// ```
pub struct SelectBuilder<T> {
    table: Option<String>,
    columns: Vec<String>,
    clauses: Clauses,
    groupings: Vec<String>,
    orders: Ordering,
    mapper: Box<dyn ResultMapper<T>>,
}

impl<T: 'static> SelectBuilder<T> {
    pub fn new(mapper: impl ResultMapper<T> + 'static) -> Self {
        Self {
            table: None,
            columns: Vec::new(),
            clauses: Clauses::new(),
            groupings: Vec::new(),
            orders: Ordering::default(),
            mapper: Box::new(mapper),
        }
    }

    /// Map rows with a closure
    pub fn from_fn<F>(mapper: F) -> Self
    where
        F: Fn(&Row<'_>) -> Result<T> + 'static,
    {
        Self::new(mapper)
    }
}

impl<T: Default + 'static> SelectBuilder<T> {
    /// Map rows by column name onto a default-constructed `T`
    pub fn with_fields(mapper: FieldMapper<T>) -> Self {
        Self::new(mapper)
    }
}

impl<T> SelectBuilder<T> {
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add a column to the projection. Without any, all columns are selected.
    pub fn select(mut self, column: &Column) -> Self {
        self.columns.push(column.name().to_string());
        self
    }

    /// Add an equality filter. A null value filters with `IS NULL`.
    pub fn filter(mut self, column: &Column, value: impl Into<Value>) -> Self {
        self.clauses.push(column.clone(), value.into());
        self
    }

    pub fn group_by(mut self, column: &Column) -> Self {
        self.groupings.push(column.name().to_string());
        self
    }

    pub fn order_by(self, column: &Column, direction: OrderType) -> Self {
        self.order_by_opt(column, Some(direction))
    }

    /// Order by a column, leaving the direction to the engine when `None`
    pub fn order_by_opt(mut self, column: &Column, direction: Option<OrderType>) -> Self {
        self.orders.push(column, direction);
        self
    }

    pub fn create_statement(&self) -> Result<Statement> {
        let table = require_table(self.table.as_deref())?;
        let mut sql = SqlJoiner::new(SELECT);
        if self.columns.is_empty() {
            sql.add(ALL_COLUMNS);
        } else {
            sql.add(self.columns.join(", "));
        }
        sql.add(FROM).add(table);
        if !self.clauses.is_empty() {
            sql.add(WHERE).add(self.clauses.conjunction());
        }
        if !self.groupings.is_empty() {
            sql.add(GROUP_BY).add(self.groupings.join(", "));
        }
        if !self.orders.is_empty() {
            sql.add(ORDER_BY).add(self.orders.render());
        }
        Ok(Statement::new(sql.finish()).with_params(self.clauses.filter_values().collect()))
    }

    pub fn get_cursor<B: Backend + ?Sized>(&self, backend: &B) -> Result<Cursor> {
        let mut cursor = Cursor::new();
        self.get_cursor_into(&mut cursor, backend)?;
        Ok(cursor)
    }

    /// Run the query into an existing cursor, replacing its rows
    pub fn get_cursor_into<B: Backend + ?Sized>(
        &self,
        cursor: &mut Cursor,
        backend: &B,
    ) -> Result<()> {
        let statement = self.create_statement()?;
        backend.query(&statement, cursor)
    }

    /// Run the query and map every row
    pub fn fetch<B: Backend + ?Sized>(&self, backend: &B) -> Result<Vec<T>> {
        let cursor = self.get_cursor(backend)?;
        self.map_cursor(&cursor)
    }

    pub fn map_cursor(&self, cursor: &Cursor) -> Result<Vec<T>> {
        cursor.rows().map(|row| self.map_row(&row)).collect()
    }

    pub fn map_row(&self, row: &Row<'_>) -> Result<T> {
        self.mapper.map(row)
    }
}
