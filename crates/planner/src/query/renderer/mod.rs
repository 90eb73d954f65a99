//! Defines the core rendering trait and context for converting AST to query text.

use crate::query::dialect::Dialect;

pub mod select;

/// A trait for any AST node that can be rendered into query text.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the query string and provides access to the dialect
/// for syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final query string.
    pub fn finish(self) -> String {
        self.sql
    }

    /// Renders a single node on its own.
    pub fn render_to_string(node: &dyn Render, dialect: &'a dyn Dialect) -> String {
        let mut renderer = Renderer::new(dialect);
        node.render(&mut renderer);
        renderer.finish()
    }
}
