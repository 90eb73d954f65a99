use crate::query::{
    ast::{
        common::JoinKind,
        expr::{Expr, PropertyRef},
        select::{FromClause, JoinClause, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.render(r);
        }

        // 2. FROM block, joins included
        if let Some(from) = &self.from {
            let mut tables = Renderer::new(r.dialect);
            from.render(&mut tables);
            for join in &self.joins {
                tables.sql.push(' ');
                join.render(&mut tables);
            }
            r.sql.push_str(" FROM ");
            r.sql.push_str(&r.dialect.from_block(&tables.finish()));
        }

        // 3. WHERE
        if !self.conditions.is_empty() {
            r.sql.push_str(" WHERE ");
            for (i, condition) in self.conditions.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(" AND ");
                }
                condition.render(r);
            }
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str(&self.table.name);
        r.sql.push_str(" AS ");
        r.sql.push_str(&self.alias);
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let join_str = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        r.sql.push_str(&format!("{join_str} "));
        r.sql.push_str(&self.table.name);
        r.sql.push_str(" AS ");
        r.sql.push_str(&self.alias);
        r.sql.push_str(" ON ");
        self.on.left.render(r);
        r.sql.push('=');
        self.on.right.render(r);
    }
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Property(property) => property.render(r),
            Expr::Raw(text) => r.sql.push_str(text),
            Expr::Grouped(inner) => {
                r.sql.push('(');
                inner.render(r);
                r.sql.push(')');
            }
        }
    }
}

impl Render for PropertyRef {
    fn render(&self, r: &mut Renderer) {
        r.sql
            .push_str(&r.dialect.property_ref(&self.qualifier, &self.name));
    }
}
