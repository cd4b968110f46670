//! Defines the core rendering trait and context for converting AST to SQL.

use crate::query::ast::expr::Expr;
use crate::query::dialect::Dialect;

pub mod filter;
pub mod insert;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL string and the names of the bind variables in the
/// order they appear, and provides access to the dialect for syntax-specific
/// details.
pub struct Renderer<'a> {
    pub sql: String,
    pub params: Vec<String>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameter names.
    pub fn finish(self) -> (String, Vec<String>) {
        (self.sql, self.params)
    }

    pub fn add_param(&mut self, name: &str) {
        self.params.push(name.to_string());
        let placeholder = self.dialect.named_placeholder(name);
        self.sql.push_str(&placeholder);
    }
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Param(name) => r.add_param(name),
        }
    }
}
