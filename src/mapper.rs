//! Conversion of result rows into typed values.
//!
//! Two ways to map a row:
//!
//! - any `Fn(&Row<'_>) -> Result<T>` closure, or
//! - a [`FieldMapper`], a table from column name to typed setter that
//!   starts from `T::default()` and assigns every result column it knows.

use crate::column::ColumnKind;
use crate::cursor::Row;
use crate::error::{Error, Result};
use crate::value::{FromValue, Value};
use std::collections::HashMap;

pub trait ResultMapper<T> {
    fn map(&self, row: &Row<'_>) -> Result<T>;
}

impl<T, F> ResultMapper<T> for F
where
    F: Fn(&Row<'_>) -> Result<T>,
{
    fn map(&self, row: &Row<'_>) -> Result<T> {
        self(row)
    }
}

type SetFn<T, V> = Box<dyn Fn(&mut T, V) + Send + Sync>;

enum Setter<T> {
    Integer(SetFn<T, i64>),
    Real(SetFn<T, f64>),
    Boolean(SetFn<T, bool>),
    Text(SetFn<T, String>),
    Untyped(SetFn<T, Value>),
}

impl<T> Setter<T> {
    fn kind(&self) -> Option<ColumnKind> {
        match self {
            Setter::Integer(_) => Some(ColumnKind::Integer),
            Setter::Real(_) => Some(ColumnKind::Real),
            Setter::Boolean(_) => Some(ColumnKind::Boolean),
            Setter::Text(_) => Some(ColumnKind::Text),
            Setter::Untyped(_) => None,
        }
    }

    fn assign(&self, target: &mut T, value: &Value) -> std::result::Result<(), String> {
        match self {
            Setter::Integer(set) => set(target, i64::from_value(value)?),
            Setter::Real(set) => set(target, f64::from_value(value)?),
            Setter::Boolean(set) => set(target, bool::from_value(value)?),
            Setter::Text(set) => set(target, String::from_value(value)?),
            Setter::Untyped(set) => set(target, value.clone()),
        }
        Ok(())
    }
}

/// Whether a setter of kind `expected` takes a column declared as `declared`.
/// Integer columns widen into real fields.
fn accepts(expected: ColumnKind, declared: ColumnKind) -> bool {
    declared == expected
        || declared == ColumnKind::Other
        || (expected == ColumnKind::Real && declared == ColumnKind::Integer)
}

/// Automatic row mapping driven by column names.
///
/// ```
/// use rust_sqlite_builder::FieldMapper;
///
/// #[derive(Default)]
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// let mapper = FieldMapper::<User>::new()
///     .integer("id", |u, v| u.id = v)
///     .text("name", |u, v| u.name = v);
/// assert_eq!(mapper.len(), 2);
/// ```
pub struct FieldMapper<T> {
    setters: HashMap<String, Setter<T>>,
}

impl<T: Default> Default for FieldMapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> FieldMapper<T> {
    pub fn new() -> Self {
        Self {
            setters: HashMap::new(),
        }
    }

    fn with(mut self, column: impl Into<String>, setter: Setter<T>) -> Self {
        self.setters.insert(column.into(), setter);
        self
    }

    pub fn integer(
        self,
        column: impl Into<String>,
        set: impl Fn(&mut T, i64) + Send + Sync + 'static,
    ) -> Self {
        self.with(column, Setter::Integer(Box::new(set)))
    }

    pub fn real(
        self,
        column: impl Into<String>,
        set: impl Fn(&mut T, f64) + Send + Sync + 'static,
    ) -> Self {
        self.with(column, Setter::Real(Box::new(set)))
    }

    pub fn boolean(
        self,
        column: impl Into<String>,
        set: impl Fn(&mut T, bool) + Send + Sync + 'static,
    ) -> Self {
        self.with(column, Setter::Boolean(Box::new(set)))
    }

    pub fn text(
        self,
        column: impl Into<String>,
        set: impl Fn(&mut T, String) + Send + Sync + 'static,
    ) -> Self {
        self.with(column, Setter::Text(Box::new(set)))
    }

    /// Untyped setter: receives the raw value whatever the declared kind
    pub fn value(
        self,
        column: impl Into<String>,
        set: impl Fn(&mut T, Value) + Send + Sync + 'static,
    ) -> Self {
        self.with(column, Setter::Untyped(Box::new(set)))
    }

    pub fn len(&self) -> usize {
        self.setters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

impl<T: Default> ResultMapper<T> for FieldMapper<T> {
    fn map(&self, row: &Row<'_>) -> Result<T> {
        let mut target = T::default();
        for index in 0..row.column_count() {
            let name = row.column_name(index).unwrap_or_default();
            let Some(setter) = self.setters.get(name) else {
                tracing::trace!(column = name, "no field for result column, skipping");
                continue;
            };
            let declared = row.column_kind(index).unwrap_or(ColumnKind::Other);
            if let Some(expected) = setter.kind() {
                if !accepts(expected, declared) {
                    return Err(Error::mapping(
                        name,
                        format!("column declared {declared} cannot be assigned to a {expected} field"),
                    ));
                }
            }
            let value = row.value(index)?;
            setter
                .assign(&mut target, value)
                .map_err(|message| Error::mapping(name, message))?;
        }
        Ok(target)
    }
}
