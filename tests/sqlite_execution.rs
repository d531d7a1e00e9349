use anyhow::Result;
use rusqlite::Connection;
use rust_sqlite_builder::{
    Backend, Column, Cursor, DeleteBuilder, FieldMapper, InsertBuilder, OrderType, Row,
    SelectBuilder, UpdateBuilder, Value,
};
use tempfile::NamedTempFile;

#[derive(Debug, Default, PartialEq)]
struct User {
    id: i64,
    name: String,
    email: String,
    age: Option<i64>,
}

// Helper function to create an in-memory database for testing
fn create_test_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    initialize_schema(&conn)?;
    Ok(conn)
}

// Initialize the database schema
fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            age INTEGER,
            avatar BLOB
        );
        CREATE INDEX idx_users_email ON users(email);
        "#,
    )?;
    Ok(())
}

struct Users {
    id: Column,
    name: Column,
    email: Column,
    age: Column,
}

fn users() -> Users {
    Users {
        id: Column::integer("id"),
        name: Column::text("name"),
        email: Column::text("email"),
        age: Column::integer("age"),
    }
}

fn add_user(conn: &Connection, name: &str, email: &str, age: Option<i64>) -> Result<i64> {
    let cols = users();
    let id = InsertBuilder::new()
        .table("users")
        .value(&cols.name, name)
        .value(&cols.email, email)
        .value(&cols.age, age)
        .insert(conn)?;
    Ok(id.expect("row inserted"))
}

fn map_user(row: &Row<'_>) -> rust_sqlite_builder::Result<User> {
    Ok(User {
        id: row.get_named("id")?,
        name: row.get_named("name")?,
        email: row.get_named("email")?,
        age: row.get_named("age")?,
    })
}

fn user_fields() -> FieldMapper<User> {
    FieldMapper::new()
        .integer("id", |u: &mut User, v| u.id = v)
        .text("name", |u: &mut User, v| u.name = v)
        .text("email", |u: &mut User, v| u.email = v)
        .value("age", |u: &mut User, v| {
            u.age = match v {
                Value::Integer(age) => Some(age),
                _ => None,
            }
        })
}

#[test]
fn test_basic_operations() -> Result<()> {
    let conn = create_test_db()?;
    let cols = users();

    let id = add_user(&conn, "John Doe", "john@example.com", Some(30))?;
    assert_eq!(id, 1);

    let user = SelectBuilder::from_fn(map_user)
        .table("users")
        .filter(&cols.id, id)
        .fetch(&conn)?;
    assert_eq!(
        user,
        vec![User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            age: Some(30),
        }]
    );

    let updated = UpdateBuilder::new()
        .table("users")
        .value(&cols.age, 31)
        .filter(&cols.id, id)
        .update(&conn)?;
    assert_eq!(updated, Some(1));

    let ages = SelectBuilder::from_fn(|row| row.get::<Option<i64>>(0))
        .table("users")
        .select(&cols.age)
        .filter(&cols.id, id)
        .fetch(&conn)?;
    assert_eq!(ages, vec![Some(31)]);

    let deleted = DeleteBuilder::new()
        .table("users")
        .filter(&cols.id, id)
        .delete(&conn)?;
    assert_eq!(deleted, Some(1));

    let remaining = SelectBuilder::from_fn(map_user)
        .table("users")
        .fetch(&conn)?;
    assert!(remaining.is_empty());
    Ok(())
}

#[test]
fn automatic_mapping_ignores_unmatched_columns() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", None)?;
    conn.execute("UPDATE users SET avatar = x'0102'", [])?;

    let found = SelectBuilder::with_fields(user_fields())
        .table("users")
        .fetch(&conn)?;
    assert_eq!(
        found,
        vec![User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            age: None,
        }]
    );
    Ok(())
}

#[test]
fn automatic_mapping_rejects_mismatched_kind() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", Some(40))?;

    // age is declared INTEGER but bound to a text field
    let mapper = FieldMapper::<User>::new().text("age", |u: &mut User, v| u.name = v);
    let err = SelectBuilder::with_fields(mapper)
        .table("users")
        .fetch(&conn)
        .unwrap_err();
    assert!(err.is_mapping());
    Ok(())
}

#[test]
fn null_filter_matches_null_rows() -> Result<()> {
    let conn = create_test_db()?;
    let cols = users();
    add_user(&conn, "Ann", "ann@example.com", None)?;
    add_user(&conn, "Bob", "bob@example.com", Some(25))?;

    let names = SelectBuilder::from_fn(|row| row.get::<String>(0))
        .table("users")
        .select(&cols.name)
        .filter(&cols.age, Value::Null)
        .fetch(&conn)?;
    assert_eq!(names, vec!["Ann".to_string()]);
    Ok(())
}

#[test]
fn ordering_and_grouping() -> Result<()> {
    let conn = create_test_db()?;
    let cols = users();
    add_user(&conn, "Ann", "ann@example.com", Some(30))?;
    add_user(&conn, "Bob", "bob@example.com", Some(20))?;
    add_user(&conn, "Cid", "cid@example.com", Some(30))?;

    let names = SelectBuilder::from_fn(|row| row.get::<String>(0))
        .table("users")
        .select(&cols.name)
        .order_by(&cols.age, OrderType::Asc)
        .order_by(&cols.name, OrderType::Desc)
        .fetch(&conn)?;
    assert_eq!(names, vec!["Bob", "Cid", "Ann"]);

    let ages = SelectBuilder::from_fn(|row| row.get::<i64>(0))
        .table("users")
        .select(&cols.age)
        .group_by(&cols.age)
        .order_by(&cols.age, OrderType::Desc)
        .fetch(&conn)?;
    assert_eq!(ages, vec![30, 20]);
    Ok(())
}

#[test]
fn update_matching_nothing_reports_zero() -> Result<()> {
    let conn = create_test_db()?;
    let cols = users();
    add_user(&conn, "Ann", "ann@example.com", Some(30))?;

    let updated = UpdateBuilder::new()
        .table("users")
        .value(&cols.age, 99)
        .filter(&cols.name, "Nobody")
        .update(&conn)?;
    assert_eq!(updated, Some(0));
    Ok(())
}

#[test]
fn unfiltered_delete_is_rejected_by_the_engine() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", None)?;

    let err = DeleteBuilder::new()
        .table("users")
        .delete(&conn)
        .unwrap_err();
    assert!(err.is_execution());

    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    assert_eq!(count, 1);
    Ok(())
}

#[test]
fn constraint_violation_is_an_execution_error() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", None)?;

    let cols = users();
    let err = InsertBuilder::new()
        .table("users")
        .value(&cols.name, "Ann again")
        .value(&cols.email, "ann@example.com")
        .insert(&conn)
        .unwrap_err();
    assert!(err.is_execution());
    Ok(())
}

#[test]
fn insert_or_ignore_duplicate_reports_no_row() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", None)?;

    let statement = rust_sqlite_builder::Statement::new(
        "INSERT OR IGNORE INTO users (name, email) VALUES (?, ?);",
    )
    .with_params(vec![Value::from("Ann"), Value::from("ann@example.com")]);
    assert_eq!(conn.insert(&statement)?, None);
    Ok(())
}

#[test]
fn cursor_reuse_replaces_previous_rows() -> Result<()> {
    let conn = create_test_db()?;
    let cols = users();
    add_user(&conn, "Ann", "ann@example.com", Some(30))?;
    add_user(&conn, "Bob", "bob@example.com", Some(20))?;

    let mut cursor = Cursor::new();
    SelectBuilder::from_fn(map_user)
        .table("users")
        .get_cursor_into(&mut cursor, &conn)?;
    assert_eq!(cursor.count(), 2);
    assert_eq!(cursor.column_count(), 5);

    SelectBuilder::from_fn(|row| row.get::<String>(0))
        .table("users")
        .select(&cols.email)
        .filter(&cols.name, "Bob")
        .get_cursor_into(&mut cursor, &conn)?;
    assert_eq!(cursor.count(), 1);
    assert_eq!(cursor.column_name(0), Some("email"));
    assert!(cursor.next());
    assert_eq!(cursor.get_string(0)?, "bob@example.com");
    assert!(!cursor.next());
    Ok(())
}

#[test]
fn cursor_typed_getters() -> Result<()> {
    let conn = create_test_db()?;
    add_user(&conn, "Ann", "ann@example.com", Some(30))?;
    conn.execute("UPDATE users SET avatar = x'CAFE'", [])?;

    let mut cursor = SelectBuilder::from_fn(map_user)
        .table("users")
        .get_cursor(&conn)?;
    assert!(cursor.next());
    let age = cursor.column_index("age").expect("age column");
    assert_eq!(cursor.get_int(age)?, 30);
    assert_eq!(cursor.get_short(age)?, 30);
    assert_eq!(cursor.get_double(age)?, 30.0);
    assert_eq!(cursor.get_blob(4)?, vec![0xCA, 0xFE]);
    assert!(!cursor.is_null(4)?);
    assert!(cursor.get_long(1).unwrap_err().is_mapping());
    Ok(())
}

#[test]
fn file_backed_database_survives_reopen() -> Result<()> {
    let temp_file = NamedTempFile::new()?;
    {
        let conn = Connection::open(temp_file.path())?;
        initialize_schema(&conn)?;
        add_user(&conn, "Ann", "ann@example.com", Some(30))?;
    }

    let conn = Connection::open(temp_file.path())?;
    let found = SelectBuilder::with_fields(user_fields())
        .table("users")
        .fetch(&conn)?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Ann");
    Ok(())
}

#[test]
fn backend_can_be_chosen_at_runtime() -> Result<()> {
    let conn = create_test_db()?;
    let backend: &dyn Backend = &conn;
    let cols = users();

    InsertBuilder::new()
        .table("users")
        .value(&cols.name, "Ann")
        .value(&cols.email, "ann@example.com")
        .insert(backend)?;
    let count = SelectBuilder::from_fn(|row| row.get::<i64>(0))
        .table("users")
        .select(&cols.id)
        .fetch(backend)?
        .len();
    assert_eq!(count, 1);
    Ok(())
}
