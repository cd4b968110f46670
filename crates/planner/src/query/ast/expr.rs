//! Expressions that can appear in generated statements.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A named bind variable, rendered with the dialect's parameter prefix.
    Param(String),
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Param(name.into())
    }
}
