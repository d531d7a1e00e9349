//! Typed SQLite statement builders and row mapping.
//!
//! # Intention
//!
//! - Assemble parameterized SELECT/INSERT/UPDATE/DELETE statements from
//!   column descriptors, without a SQL parser.
//! - Map result rows back into typed values, through a closure or a
//!   column-name → setter table.
//! - Execute through an explicit [`Backend`] chosen by the caller.
//!
//! # Architectural Boundaries
//!
//! - The SQL engine is SQLite via `rusqlite`; nothing here parses or
//!   validates SQL beyond assembling it.
//! - No transactions, migrations framework, pooling or query planning.
//!
//! ```
//! use rusqlite::Connection;
//! use rust_sqlite_builder::{Column, InsertBuilder, SelectBuilder};
//!
//! let conn = Connection::open_in_memory().unwrap();
//! conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);")
//!     .unwrap();
//!
//! let name = Column::text("name");
//! let id = InsertBuilder::new()
//!     .table("users")
//!     .value(&name, "Ann")
//!     .insert(&conn)
//!     .unwrap();
//! assert_eq!(id, Some(1));
//!
//! let names = SelectBuilder::from_fn(|row| row.get::<String>(0))
//!     .table("users")
//!     .select(&name)
//!     .fetch(&conn)
//!     .unwrap();
//! assert_eq!(names, vec!["Ann".to_string()]);
//! ```

pub mod backend;
pub mod builder;
pub mod clause;
pub mod column;
pub mod config;
pub mod cursor;
pub mod error;
pub mod keywords;
pub mod mapper;
pub mod session;
pub mod statement;
pub mod value;

pub use backend::Backend;
pub use builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use clause::{Clauses, OrderType};
pub use column::{Column, ColumnKind};
pub use config::DatabaseConfig;
pub use cursor::{ColumnMeta, Cursor, Row};
pub use error::{Error, Result};
pub use mapper::{FieldMapper, ResultMapper};
pub use session::Session;
pub use statement::Statement;
pub use value::{FromValue, Value};
