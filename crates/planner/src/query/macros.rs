#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::query::ast::common::TableRef {
            name: $name.to_string(),
        }
    };
}

#[macro_export]
macro_rules! property_ref {
    ($qualifier:expr, $name:expr) => {
        $crate::query::ast::expr::PropertyRef {
            qualifier: $qualifier.to_string(),
            name: $name.to_string(),
        }
    };
}
