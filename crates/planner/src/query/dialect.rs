//! Defines the `Dialect` trait for database-specific SQL syntax.

pub trait Dialect: Send + Sync {
    /// The bind-variable marker that precedes a named parameter in generated
    /// SQL text.
    ///
    /// - PostgreSQL fixtures use `:`, as in `:customer_id`
    fn parameter_prefix(&self) -> &'static str;

    /// Returns the named placeholder for a parameter, e.g. `:customer_id`.
    fn named_placeholder(&self, name: &str) -> String {
        format!("{}{}", self.parameter_prefix(), name)
    }

    /// Returns the positional placeholder the driver itself understands.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    fn positional_placeholder(&self, index: usize) -> String;

    /// Whether generated values can be read back with `INSERT ... RETURNING`.
    fn supports_return_on_insert(&self) -> bool;

    /// Returns the name of the dialect (e.g., "PostgreSQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn parameter_prefix(&self) -> &'static str {
        ":"
    }

    fn positional_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn supports_return_on_insert(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}
