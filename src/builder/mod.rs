//! Fluent statement builders.
//!
//! Each builder accumulates a table name, columns and clause values through
//! `self`-consuming calls, renders a [`Statement`](crate::Statement) on
//! demand and executes it through a caller-supplied [`Backend`](crate::Backend).

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::error::{Error, Result};

fn require_table(table: Option<&str>) -> Result<&str> {
    match table {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::config("table name is not set")),
    }
}
