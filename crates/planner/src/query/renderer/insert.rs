use crate::query::{ast::insert::Insert, renderer::Render};

impl Render for Insert {
    fn render(&self, r: &mut super::Renderer) {
        // 1. insert into table(...)
        r.sql.push_str("insert into ");
        r.sql.push_str(&self.table);
        r.sql.push('(');
        r.sql.push_str(&self.columns.join(","));
        r.sql.push(')');

        // 2. values (...)
        r.sql.push_str(" values (");
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                r.sql.push(',');
            }
            value.render(r);
        }
        r.sql.push(')');

        // 3. returning ...
        if !self.returning.is_empty() {
            r.sql.push_str(" returning ");
            r.sql.push_str(&self.returning.join(","));
        }
    }
}
