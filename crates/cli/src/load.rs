use crate::error::CliError;
use planner::{ConventionMetadata, LambdaQuery, MetadataResolver, StaticMetadata};
use std::sync::Arc;
use tracing::info;

pub async fn load_query(path: &str) -> Result<LambdaQuery, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let query: LambdaQuery = serde_json::from_str(&source)?;
    info!(
        "Loaded query over {} with {} filter(s)",
        query.item_type,
        query.filters.len()
    );
    Ok(query)
}

/// Schema file when given, naming conventions otherwise.
pub async fn load_metadata(
    schema: Option<&str>,
    suffix: &str,
) -> Result<Arc<dyn MetadataResolver>, CliError> {
    match schema {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            let metadata = StaticMetadata::from_json(&source)?;
            info!("Loaded schema with {} item type(s)", metadata.entities.len());
            Ok(Arc::new(metadata))
        }
        None => {
            info!("No schema given, using naming conventions (suffix `{suffix}`)");
            Ok(Arc::new(ConventionMetadata::new(suffix)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::identifiers::EntityType;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_query_file() {
        let file = write_temp(r#"{ "item_type": "OrderModel", "limit": 5 }"#);
        let query = load_query(file.path().to_str().unwrap()).await.unwrap();

        assert_eq!(query.item_type, EntityType::new("OrderModel"));
        assert!(query.filters.is_empty());
        assert_eq!(query.limit, Some(5));
    }

    #[tokio::test]
    async fn test_load_schema_file() {
        let file = write_temp(
            r#"{ "entities": { "OrderModel": { "table": "Order", "columns": {} } } }"#,
        );
        let metadata = load_metadata(Some(file.path().to_str().unwrap()), "Model")
            .await
            .unwrap();
        assert_eq!(
            metadata
                .resolve_table_name(&EntityType::new("OrderModel"))
                .unwrap(),
            "Order"
        );
    }

    #[tokio::test]
    async fn test_bad_schema_is_reported() {
        let file = write_temp("{ not json");
        let result = load_metadata(Some(file.path().to_str().unwrap()), "Model").await;
        assert!(matches!(result, Err(CliError::Schema(_))));
    }

    #[tokio::test]
    async fn test_conventions_without_schema() {
        let metadata = load_metadata(None, "Item").await.unwrap();
        assert_eq!(
            metadata
                .resolve_table_name(&EntityType::new("ProductItem"))
                .unwrap(),
            "Product"
        );
    }
}
