//! Defines the `Dialect` trait for engine-specific query syntax.

pub trait Dialect: Send + Sync {
    /// Renders a qualified property reference.
    ///
    /// - FlexibleSearch uses braces: `{this.code}`
    fn property_ref(&self, qualifier: &str, name: &str) -> String;

    /// Returns the placeholder for a named parameter.
    ///
    /// - FlexibleSearch uses `?name`
    fn placeholder(&self, name: &str) -> String;

    /// Wraps the table list (root type plus joins) of the FROM clause.
    fn from_block(&self, tables: &str) -> String;

    /// Name of the primary-key property every item type carries.
    fn primary_key(&self) -> &str;

    /// Returns the name of the dialect (e.g., "FlexibleSearch").
    fn name(&self) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct FlexibleSearch;

impl Dialect for FlexibleSearch {
    fn property_ref(&self, qualifier: &str, name: &str) -> String {
        format!("{{{qualifier}.{name}}}")
    }

    fn placeholder(&self, name: &str) -> String {
        format!("?{name}")
    }

    fn from_block(&self, tables: &str) -> String {
        format!("{{{tables}}}")
    }

    fn primary_key(&self) -> &str {
        "PK"
    }

    fn name(&self) -> String {
        "FlexibleSearch".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_search_syntax() {
        let dialect = FlexibleSearch;
        assert_eq!(dialect.property_ref("this", "code"), "{this.code}");
        assert_eq!(dialect.placeholder("ab"), "?ab");
        assert_eq!(dialect.from_block("Order AS this"), "{Order AS this}");
        assert_eq!(dialect.primary_key(), "PK");
    }
}
