use crate::query::{ast::filter::Filter, renderer::Render};

impl Render for Filter {
    fn render(&self, r: &mut super::Renderer) {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(" and ");
            }
            r.sql.push_str(&condition.column);
            r.sql.push('=');
            condition.value.render(r);
        }
    }
}
