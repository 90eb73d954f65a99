use async_trait::async_trait;
use engine_runtime::{ExecutorError, QueryExecutor};
use model::core::value::Value;
use planner::CompiledQuery;
use std::{collections::BTreeMap, sync::Mutex};
use tracing::debug;

/// In-memory search backend: answers a query only when both its text and its
/// bindings match a registered fixture.
#[derive(Default)]
pub struct FixtureExecutor {
    fixtures: Vec<(String, BTreeMap<String, Value>, Vec<Value>)>,
    executed: Mutex<Vec<CompiledQuery>>,
}

impl FixtureExecutor {
    pub fn with_rows(mut self, query: &str, parameters: &[(&str, Value)], rows: Vec<Value>) -> Self {
        let parameters = parameters
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.fixtures.push((query.to_string(), parameters, rows));
        self
    }

    pub fn executed(&self) -> Vec<CompiledQuery> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QueryExecutor for FixtureExecutor {
    async fn search(&self, query: &CompiledQuery) -> Result<Vec<Value>, ExecutorError> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(query.clone());
        }
        let rows = self
            .fixtures
            .iter()
            .find(|(text, parameters, _)| *text == query.query && *parameters == query.parameters)
            .map(|(_, _, rows)| rows.clone())
            .unwrap_or_default();
        debug!(rows = rows.len(), "fixture lookup");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{PHONE_CONTACT_INFO, USER, field, item, read, translator};
    use engine_runtime::{SearchError, SearchService};
    use model::{
        core::{data_type::TypeRef, value::EntityRef},
        expr::{
            Lambda,
            build::{constant, param},
        },
    };
    use planner::LambdaQuery;
    use std::sync::Arc;
    use tracing_test::traced_test;

    const USER_BY_UID: &str = "SELECT {this.PK} FROM {User AS this} WHERE ({this.uid} = ?a)";
    const CONTACT_BY_USER_UID: &str = "SELECT {this.PK} FROM {PhoneContactInfo AS this \
        LEFT JOIN User AS thisuser ON {this.user}={thisuser.PK}} WHERE ({thisuser.uid} = ?a)";
    const CONTACT_BY_USER: &str =
        "SELECT {this.PK} FROM {PhoneContactInfo AS this} WHERE ({this.user} = ?a)";

    fn user(pk: u64, uid: &str) -> EntityRef {
        EntityRef::new(USER, pk).with_attribute("uid", uid)
    }

    fn contact(pk: u64) -> Value {
        Value::Entity(EntityRef::new(PHONE_CONTACT_INFO, pk))
    }

    fn users_with_uid(uid: &str) -> LambdaQuery {
        let body = field(USER, "getUid", TypeRef::Text).equals(constant(uid));
        LambdaQuery::new(USER).filter(Lambda::predicate(item(USER), body))
    }

    fn contacts_of(owner: EntityRef) -> LambdaQuery {
        let owner_uid = read(param(1), USER, "getUid", TypeRef::Text);
        let body = read(
            field(PHONE_CONTACT_INFO, "getUser", item(USER)),
            USER,
            "getUid",
            TypeRef::Text,
        )
        .equals(owner_uid);
        let predicate =
            Lambda::predicate(item(PHONE_CONTACT_INFO), body).capture(item(USER), owner);
        LambdaQuery::new(PHONE_CONTACT_INFO).filter(predicate)
    }

    fn service(executor: Arc<FixtureExecutor>) -> SearchService {
        SearchService::new(translator(), executor)
    }

    #[traced_test]
    #[tokio::test]
    async fn user_found_by_uid() {
        let anna = Value::Entity(user(1, "anna"));
        let executor = Arc::new(FixtureExecutor::default().with_rows(
            USER_BY_UID,
            &[("a", Value::from("anna"))],
            vec![anna.clone()],
        ));
        let service = service(executor.clone());

        let first = service.get_first(&users_with_uid("anna")).await.unwrap();
        assert_eq!(first, Some(anna.clone()));

        let list = service.get_list(&users_with_uid("anna")).await.unwrap();
        assert_eq!(list, vec![anna.clone()]);

        let single = service
            .get_single_result(&users_with_uid("anna"))
            .await
            .unwrap();
        assert_eq!(single, anna);

        let counts = executor
            .executed()
            .iter()
            .map(|query| query.count)
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![Some(1), None, Some(2)]);
    }

    #[traced_test]
    #[tokio::test]
    async fn contacts_through_captured_user_uid() {
        let executor = Arc::new(FixtureExecutor::default().with_rows(
            CONTACT_BY_USER_UID,
            &[("a", Value::from("anna"))],
            vec![contact(10), contact(11)],
        ));

        let rows = service(executor)
            .get_list(&contacts_of(user(1, "anna")))
            .await
            .unwrap();
        assert_eq!(rows, vec![contact(10), contact(11)]);
    }

    #[traced_test]
    #[tokio::test]
    async fn contacts_of_captured_user() {
        let owner = user(1, "anna");
        let body = field(PHONE_CONTACT_INFO, "getUser", item(USER)).equals(param(1));
        let predicate =
            Lambda::predicate(item(PHONE_CONTACT_INFO), body).capture(item(USER), owner.clone());
        let query = LambdaQuery::new(PHONE_CONTACT_INFO).filter(predicate);

        let executor = Arc::new(FixtureExecutor::default().with_rows(
            CONTACT_BY_USER,
            &[("a", Value::Entity(owner))],
            vec![contact(10)],
        ));

        let found = service(executor).get_single_result(&query).await.unwrap();
        assert_eq!(found, contact(10));
    }

    #[traced_test]
    #[tokio::test]
    async fn single_result_reports_missing_and_ambiguous() {
        let executor = Arc::new(FixtureExecutor::default().with_rows(
            CONTACT_BY_USER_UID,
            &[("a", Value::from("anna"))],
            vec![contact(10), contact(11), contact(12)],
        ));
        let service = service(executor);

        let ambiguous = service
            .get_single_result(&contacts_of(user(1, "anna")))
            .await;
        assert!(matches!(ambiguous, Err(SearchError::Ambiguous { .. })));

        let missing = service
            .get_single_result(&contacts_of(user(2, "bob")))
            .await;
        match missing {
            Err(SearchError::NotFound { query }) => assert_eq!(query, CONTACT_BY_USER_UID),
            other => panic!("expected NotFound, got {other:?}"),
        }

        let none = service.get_first(&contacts_of(user(2, "bob"))).await.unwrap();
        assert_eq!(none, None);
    }

    #[traced_test]
    #[tokio::test]
    async fn compile_errors_never_reach_the_backend() {
        let executor = Arc::new(FixtureExecutor::default());
        let result = service(executor.clone())
            .get_list(&LambdaQuery::new("WarehouseModel"))
            .await;

        assert!(matches!(result, Err(SearchError::Compile(_))));
        assert!(executor.executed().is_empty());
    }
}
