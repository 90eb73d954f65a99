#![allow(dead_code)]

use model::{
    core::{
        data_type::TypeRef,
        value::{Invocable, InvocationError, Value},
    },
    expr::{Accessor, Expr, Lambda, build::param},
};
use planner::{CompiledQuery, LambdaQuery, QueryTranslator, StaticMetadata};
use std::sync::Arc;

pub const TEST_ITEM: &str = "TestItemModel";
pub const ORDER: &str = "OrderModel";
pub const USER: &str = "UserModel";
pub const ADDRESS: &str = "AddressModel";
pub const COUNTRY: &str = "CountryModel";
pub const PHONE_CONTACT_INFO: &str = "PhoneContactInfoModel";

/// Schema of the fixture item graph. Table names are the type names without
/// the `Model` suffix.
pub fn schema() -> StaticMetadata {
    StaticMetadata::default()
        .entity(
            TEST_ITEM,
            "TestItem",
            &[
                ("getInteger", "integer"),
                ("getPrimitiveInteger", "primitiveInteger"),
                ("getString", "string"),
                ("getBoolean", "boolean"),
                ("getA", "a"),
            ],
        )
        .entity(
            ORDER,
            "Order",
            &[
                ("getCode", "code"),
                ("getUser", "user"),
                ("getStatusDisplay", "statusDisplay"),
                ("getDeliveryAddress", "deliveryAddress"),
            ],
        )
        .entity(USER, "User", &[("getUid", "uid"), ("getName", "name")])
        .entity(
            ADDRESS,
            "Address",
            &[("getCountry", "country"), ("getCompany", "company")],
        )
        .entity(COUNTRY, "Country", &[("getIsocode", "isocode")])
        .entity(
            PHONE_CONTACT_INFO,
            "PhoneContactInfo",
            &[("getUser", "user"), ("getPhoneNumber", "phoneNumber")],
        )
}

pub fn translator() -> QueryTranslator {
    QueryTranslator::new(Arc::new(schema()))
}

pub fn item(name: &str) -> TypeRef {
    TypeRef::entity(name)
}

/// `owner.getter()` read off `receiver`.
pub fn read(receiver: Expr, owner: &str, getter: &str, ty: TypeRef) -> Expr {
    receiver.get(Accessor::getter(item(owner), getter, ty))
}

/// `e.getter()` on the entity under match.
pub fn field(owner: &str, getter: &str, ty: TypeRef) -> Expr {
    read(param(0), owner, getter, ty)
}

/// `map.get(key)` / `list.get(index)`. The declaring type is informational:
/// folding dispatches on the captured value.
pub fn collection_get(receiver: Expr, key: Expr) -> Expr {
    receiver.call(
        Accessor::method(TypeRef::Collection, "get", vec![TypeRef::Object], TypeRef::Object),
        vec![key],
    )
}

pub fn test_item_predicate(body: Expr) -> Lambda {
    Lambda::predicate(item(TEST_ITEM), body)
}

pub fn order_predicate(body: Expr) -> Lambda {
    Lambda::predicate(item(ORDER), body)
}

pub fn translate_test_item(predicate: Lambda) -> CompiledQuery {
    let query = LambdaQuery::new(TEST_ITEM).filter(predicate);
    translator().translate(&query).unwrap()
}

/// Where-text without the surrounding parentheses of the single predicate.
pub fn where_of(query: &str) -> &str {
    let (_, where_clause) = query.split_once("WHERE").unwrap_or((query, ""));
    let where_clause = where_clause.trim();
    where_clause
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(where_clause)
}

/// Bound values in placeholder order.
pub fn bound_values(compiled: &CompiledQuery) -> Vec<Value> {
    compiled.parameters.values().cloned().collect()
}

pub fn check_where(predicate: Lambda, expected_where: &str, expected_params: &[Value]) {
    let compiled = translate_test_item(predicate);
    let actual = where_of(&compiled.query);
    assert!(
        actual.eq_ignore_ascii_case(expected_where),
        "where-text mismatch\n  expected: {expected_where}\n    actual: {actual}"
    );
    assert_eq!(bound_values(&compiled), expected_params);
}

/// Caller object whose text form is assembled piecewise, like a string builder.
#[derive(Debug, Default)]
pub struct TextBuilder {
    text: String,
}

impl TextBuilder {
    pub fn append(mut self, part: &str) -> Self {
        self.text.push_str(part);
        self
    }
}

impl Invocable for TextBuilder {
    fn type_name(&self) -> &str {
        "TextBuilder"
    }

    fn invoke(&self, method: &str, _args: &[Value]) -> Result<Value, InvocationError> {
        match method {
            "toString" => Ok(Value::String(self.text.clone())),
            "length" => Ok(Value::Int(self.text.chars().count() as i64)),
            other => Err(format!("TextBuilder has no method `{other}`").into()),
        }
    }
}
