use crate::query::ast::{
    expr::Expr,
    filter::{Condition, Filter},
};

#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    ast: Filter,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `column` to equal the named parameter `param`.
    pub fn eq_param(mut self, column: &str, param: &str) -> Self {
        self.ast.conditions.push(Condition {
            column: column.to_string(),
            value: Expr::param(param),
        });
        self
    }

    pub fn build(self) -> Filter {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::FilterBuilder;

    #[test]
    fn test_filter_builder() {
        let filter = FilterBuilder::new()
            .eq_param("table_schema", "0")
            .eq_param("table_name", "1")
            .build();

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.conditions[0].column, "table_schema");
        assert_eq!(filter.conditions[1].column, "table_name");
    }
}
