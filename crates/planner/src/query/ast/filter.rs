//! Defines the AST for a conjunctive equality filter, as used by catalog
//! lookups (`table_schema=:0 and table_name=:1`).

use crate::query::ast::expr::Expr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

/// `column = value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: String,
    pub value: Expr,
}

impl Filter {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}
