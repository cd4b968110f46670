use crate::query::ast::{expr::Expr, insert::Insert};

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            ast: Insert {
                table: table.to_string(),
                ..Default::default()
            },
        }
    }

    /// Adds a caller-supplied column bound to the named parameter `param`.
    pub fn value(mut self, column: &str, param: &str) -> Self {
        self.ast.columns.push(column.to_string());
        self.ast.values.push(Expr::param(param));
        self
    }

    /// Adds a column whose server-generated value is read back.
    pub fn returning(mut self, column: &str) -> Self {
        self.ast.returning.push(column.to_string());
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}
