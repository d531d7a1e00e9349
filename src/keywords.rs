//! SQL keyword tokens used when rendering statements.

pub const SELECT: &str = "SELECT";
pub const INSERT: &str = "INSERT";
pub const UPDATE: &str = "UPDATE";
pub const DELETE: &str = "DELETE";
pub const SET: &str = "SET";
pub const FROM: &str = "FROM";
pub const INTO: &str = "INTO";
pub const VALUES: &str = "VALUES";
pub const WHERE: &str = "WHERE";
pub const GROUP_BY: &str = "GROUP BY";
pub const ORDER_BY: &str = "ORDER BY";
pub const AND: &str = "AND";
pub const IS_NULL: &str = "IS NULL";
pub const ALL_COLUMNS: &str = "*";
pub const PLACEHOLDER: &str = "?";
