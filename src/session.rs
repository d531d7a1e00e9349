//! An open database plus the operations callers run against it.
//!
//! A [`Session`] is constructed explicitly and passed by reference; there is
//! no process-wide instance. It implements [`Backend`], so builders can run
//! against it directly or through its forwarding methods.

use crate::backend::Backend;
use crate::builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use crate::config::DatabaseConfig;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::statement::Statement;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub struct Session {
    config: DatabaseConfig,
    location: PathBuf,
    connection: Connection,
}

impl Session {
    /// Open or create the database and bring its schema to the configured version.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.version == 0 {
            return Err(Error::config("database version must be at least 1"));
        }
        let location = resolve_location(&config);
        let connection = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&location)
        }
        .map_err(|source| Error::Open {
            path: location.clone(),
            source,
        })?;
        tracing::info!(path = %location.display(), version = config.version, "opened database");

        let session = Self {
            config,
            location,
            connection,
        };
        session.apply_schema_hooks()?;
        Ok(session)
    }

    fn apply_schema_hooks(&self) -> Result<()> {
        let stored: u32 = self
            .connection
            .pragma_query_value(None, "user_version", |row| row.get(0))?;
        let target = self.config.version;
        if stored > target {
            return Err(Error::config(format!(
                "database is at version {stored}, newer than configured version {target}"
            )));
        }

        if stored == 0 {
            if let Some(sql) = &self.config.on_create {
                tracing::info!(version = target, "running create script");
                self.connection.execute_batch(sql)?;
            }
        } else if stored < target {
            if let Some(sql) = &self.config.on_upgrade {
                tracing::info!(from = stored, to = target, "running upgrade script");
                self.connection.execute_batch(sql)?;
            }
        }
        if stored != target {
            self.connection.pragma_update(None, "user_version", target)?;
        }
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn version(&self) -> u32 {
        self.config.version
    }

    /// Resolved location of the database file
    pub fn path(&self) -> &Path {
        &self.location
    }

    /// Run one or more raw SQL statements
    pub fn exec(&self, sql: &str) -> Result<()> {
        tracing::debug!(sql, "exec");
        self.connection.execute_batch(sql)?;
        Ok(())
    }

    pub fn raw_query(&self, sql: &str) -> Result<Cursor> {
        let mut cursor = Cursor::new();
        self.raw_query_into(&mut cursor, sql)?;
        Ok(cursor)
    }

    pub fn raw_query_into(&self, cursor: &mut Cursor, sql: &str) -> Result<()> {
        self.query(&Statement::new(sql), cursor)
    }

    pub fn get_cursor<T>(&self, builder: &SelectBuilder<T>) -> Result<Cursor> {
        builder.get_cursor(self)
    }

    pub fn get_cursor_into<T>(&self, cursor: &mut Cursor, builder: &SelectBuilder<T>) -> Result<()> {
        builder.get_cursor_into(cursor, self)
    }

    pub fn fetch<T>(&self, builder: &SelectBuilder<T>) -> Result<Vec<T>> {
        builder.fetch(self)
    }

    pub fn insert(&self, builder: &InsertBuilder) -> Result<Option<i64>> {
        builder.insert(self)
    }

    pub fn update(&self, builder: &UpdateBuilder) -> Result<Option<usize>> {
        builder.update(self)
    }

    pub fn delete(&self, builder: &DeleteBuilder) -> Result<Option<usize>> {
        builder.delete(self)
    }

    pub fn close(self) -> Result<()> {
        let location = self.location;
        self.connection.close().map_err(|(_, err)| err)?;
        tracing::info!(path = %location.display(), "closed database");
        Ok(())
    }
}

impl Backend for Session {
    fn query(&self, statement: &Statement, cursor: &mut Cursor) -> Result<()> {
        Backend::query(&self.connection, statement, cursor)
    }

    fn insert(&self, statement: &Statement) -> Result<Option<i64>> {
        Backend::insert(&self.connection, statement)
    }

    fn execute(&self, statement: &Statement) -> Result<Option<usize>> {
        Backend::execute(&self.connection, statement)
    }
}

/// Where the database file lives.
///
/// Without a directory the bare name is used. A directory that cannot be
/// created is logged and the bare name is used instead.
fn resolve_location(config: &DatabaseConfig) -> PathBuf {
    let bare = PathBuf::from(&config.name);
    let dir = match &config.path {
        Some(dir) if !dir.as_os_str().is_empty() && !config.is_in_memory() => dir,
        _ => return bare,
    };
    match std::fs::create_dir_all(dir) {
        Ok(()) => dir.join(&config.name),
        Err(err) => {
            tracing::error!(
                dir = %dir.display(),
                name = %config.name,
                error = %err,
                "cannot create database directory, using default location"
            );
            bare
        }
    }
}
