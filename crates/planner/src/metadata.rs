//! Mapping from item types and accessors to query-level names.

use crate::error::ResolutionError;
use model::{core::identifiers::EntityType, expr::Accessor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolves item types to table names and getters to column names.
pub trait MetadataResolver: Send + Sync {
    fn resolve_table_name(&self, entity: &EntityType) -> Result<String, ResolutionError>;

    /// Column read by `accessor`, or `None` when it is not a column getter.
    fn resolve_column(&self, accessor: &Accessor) -> Option<String>;
}

/// Explicit schema, usually loaded from a JSON file:
///
/// ```json
/// { "entities": { "OrderModel": { "table": "Order", "columns": { "getUser": "user" } } } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticMetadata {
    #[serde(default)]
    pub entities: HashMap<String, EntityMapping>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityMapping {
    pub table: String,
    /// Accessor name to column name.
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

impl StaticMetadata {
    pub fn from_json(json: &str) -> Result<Self, ResolutionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn entity(mut self, name: &str, table: &str, columns: &[(&str, &str)]) -> Self {
        let mapping = EntityMapping {
            table: table.to_string(),
            columns: columns
                .iter()
                .map(|(accessor, column)| (accessor.to_string(), column.to_string()))
                .collect(),
        };
        self.entities.insert(name.to_string(), mapping);
        self
    }
}

impl MetadataResolver for StaticMetadata {
    fn resolve_table_name(&self, entity: &EntityType) -> Result<String, ResolutionError> {
        self.entities
            .get(entity.as_str())
            .map(|mapping| mapping.table.clone())
            .ok_or_else(|| ResolutionError::NotFound(entity.clone()))
    }

    fn resolve_column(&self, accessor: &Accessor) -> Option<String> {
        if !accessor.parameters.is_empty() {
            return None;
        }
        let entity = accessor.declaring_type.as_entity()?;
        self.entities
            .get(entity.as_str())?
            .columns
            .get(&accessor.name)
            .cloned()
    }
}

/// Naming-convention resolver: `OrderModel` maps to table `Order`, and every
/// bean getter on an item type maps to its property name.
#[derive(Debug, Clone)]
pub struct ConventionMetadata {
    suffix: String,
}

impl ConventionMetadata {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for ConventionMetadata {
    fn default() -> Self {
        Self::new("Model")
    }
}

impl MetadataResolver for ConventionMetadata {
    fn resolve_table_name(&self, entity: &EntityType) -> Result<String, ResolutionError> {
        let name = entity.as_str();
        let table = name.strip_suffix(self.suffix.as_str()).unwrap_or(name);
        if table.is_empty() {
            return Err(ResolutionError::NotFound(entity.clone()));
        }
        Ok(table.to_string())
    }

    fn resolve_column(&self, accessor: &Accessor) -> Option<String> {
        if !accessor.declaring_type.is_entity() {
            return None;
        }
        accessor.property_name()
    }
}
