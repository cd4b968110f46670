//! Defines the AST for an INSERT statement.

use crate::query::ast::expr::Expr;
use serde::{Deserialize, Serialize};

/// Represents a single-row INSERT statement.
///
/// `columns` and `values` are index-aligned: the Nth column receives the Nth
/// value. Columns listed in `returning` are not supplied by the caller; the
/// server fills them in and hands them back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    /// Target table, rendered as given (it may be schema-qualified).
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Expr>,
    pub returning: Vec<String>,
}
