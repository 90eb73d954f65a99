//! Translation of one predicate tree into where-text, joins and bindings.

pub mod joins;
pub mod names;
pub mod result;

use crate::{error::CompileError, metadata::MetadataResolver, query::dialect::Dialect};
use expression_engine::{ConstantFolder, DynamicCall};
use joins::{JoinPath, JoinTracker};
use model::{
    core::value::Value,
    expr::{Accessor, BinaryOp, Expr, Lambda, Member, UnaryOp},
};
use names::ParameterNameGenerator;
use result::TranslationResult;
use std::{collections::BTreeMap, mem};
use tracing::{debug, trace};

pub type Result<T> = std::result::Result<T, CompileError>;

/// Query-language spelling of a binary operator.
pub fn operator_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Equal => "=",
        BinaryOp::LessThan => "<",
        BinaryOp::LessOrEqual => "<=",
        BinaryOp::GreaterThan => ">",
        BinaryOp::GreaterOrEqual => ">=",
        BinaryOp::And => "AND",
        BinaryOp::Or => "OR",
    }
}

/// Wildcards a text-pattern call adds to the next bound literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikePattern {
    Prefix,
    Suffix,
    Infix,
}

impl LikePattern {
    fn for_accessor(accessor: &Accessor) -> Option<Self> {
        if !accessor.declaring_type.is_text() || accessor.parameters.len() != 1 {
            return None;
        }
        match accessor.name.as_str() {
            "startsWith" => Some(LikePattern::Prefix),
            "endsWith" => Some(LikePattern::Suffix),
            "contains" => Some(LikePattern::Infix),
            _ => None,
        }
    }

    fn apply(self, value: Value) -> Value {
        let text = value.to_string();
        Value::String(match self {
            LikePattern::Prefix => format!("{text}%"),
            LikePattern::Suffix => format!("%{text}"),
            LikePattern::Infix => format!("%{text}%"),
        })
    }
}

/// Walks one predicate and accumulates its [`TranslationResult`].
///
/// Sub-trees that never read the entity are handed to the constant folder and
/// bound as a single parameter; everything else is emitted as query text.
/// A compiler is single-use: build one per predicate and call [`compile`].
///
/// [`compile`]: QueryCompiler::compile
pub struct QueryCompiler<'a> {
    lambda: &'a Lambda,
    metadata: &'a dyn MetadataResolver,
    dialect: &'a dyn Dialect,
    names: &'a mut ParameterNameGenerator,
    folder: ConstantFolder<'a>,
    joins: JoinTracker,
    where_text: String,
    parameters: BTreeMap<String, Value>,
    modifiers: Vec<LikePattern>,
    suppress_columns: bool,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(
        lambda: &'a Lambda,
        metadata: &'a dyn MetadataResolver,
        calls: &'a dyn DynamicCall,
        dialect: &'a dyn Dialect,
        names: &'a mut ParameterNameGenerator,
    ) -> Self {
        Self {
            lambda,
            metadata,
            dialect,
            names,
            folder: ConstantFolder::new(calls, lambda.root_scope()),
            joins: JoinTracker::new(),
            where_text: String::new(),
            parameters: BTreeMap::new(),
            modifiers: Vec::new(),
            suppress_columns: false,
        }
    }

    pub fn compile(mut self) -> Result<TranslationResult> {
        let lambda = self.lambda;
        self.visit(&lambda.body)?;

        debug!(
            where_text = %self.where_text,
            joins = self.joins.joins().len(),
            parameters = self.parameters.len(),
            "predicate compiled"
        );

        Ok(TranslationResult {
            where_text: self.where_text,
            joins: self.joins.into_joins(),
            parameters: self.parameters,
        })
    }

    fn visit(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Lambda(lambda) => self.visit(&lambda.body),
            Expr::Binary { left, op, right } => {
                self.visit_operand(left, *op)?;
                self.push_operator(operator_symbol(*op));
                self.visit_operand(right, *op)
            }
            Expr::Unary { op, operand } => self.visit_unary(op, operand),
            Expr::Constant(value) => {
                self.bind(value.clone());
                Ok(())
            }
            Expr::Parameter { index } => {
                // the entity itself contributes no text
                if self.lambda.is_entity_slot(*index) {
                    Ok(())
                } else {
                    self.fold_and_bind(expr)
                }
            }
            Expr::Member(_) | Expr::Invocation(_) if self.is_foldable(expr) => {
                self.fold_and_bind(expr)
            }
            Expr::Member(member) => self.visit_member(member),
            Expr::Invocation(invocation) => {
                self.visit(&invocation.target)?;
                for argument in &invocation.arguments {
                    self.visit(argument)?;
                }
                Ok(())
            }
        }
    }

    /// Groups an operand that binds looser than its parent operator.
    fn visit_operand(&mut self, operand: &Expr, parent: BinaryOp) -> Result<()> {
        let grouped = matches!(
            strip_converts(operand),
            Expr::Binary { op, .. } if op.precedence() < parent.precedence()
        );
        if grouped {
            self.where_text.push('(');
            self.visit(operand)?;
            self.where_text.push(')');
            Ok(())
        } else {
            self.visit(operand)
        }
    }

    fn visit_unary(&mut self, op: &UnaryOp, operand: &Expr) -> Result<()> {
        match op {
            UnaryOp::IsNull => {
                self.visit(operand)?;
                self.where_text.push_str(" IS NULL");
                Ok(())
            }
            UnaryOp::Convert => self.visit(operand),
            UnaryOp::Not => {
                self.where_text.push_str("NOT(");
                self.visit(operand)?;
                self.where_text.push(')');
                Ok(())
            }
            UnaryOp::Other(name) => {
                let symbol = match name.parse::<BinaryOp>() {
                    Ok(op) => operator_symbol(op),
                    Err(_) if name == "IsNull" => "IS NULL",
                    Err(err) => return Err(CompileError::Unsupported(err.to_string())),
                };
                self.push_operator(symbol);
                self.visit(operand)
            }
        }
    }

    fn visit_member(&mut self, member: &Member) -> Result<()> {
        let accessor = &member.accessor;

        if let Some(column) = self.metadata.resolve_column(accessor) {
            // only the outermost getter of a chain emits a column
            let enclosing = mem::replace(&mut self.suppress_columns, true);
            self.visit(&member.instance)?;
            let location = self.locate(member)?;
            self.suppress_columns = enclosing;

            if !self.suppress_columns {
                let reference = self.dialect.property_ref(&location.alias, &column);
                self.where_text.push_str(&reference);
                if accessor.return_type.is_boolean() {
                    self.push_operator(operator_symbol(BinaryOp::Equal));
                    self.bind(Value::Boolean(true));
                }
            }
            Ok(())
        } else if accessor.is_equals() {
            self.visit(&member.instance)?;
            self.push_operator(operator_symbol(BinaryOp::Equal));
            Ok(())
        } else if let Some(pattern) = LikePattern::for_accessor(accessor) {
            self.visit(&member.instance)?;
            self.push_operator("LIKE");
            self.modifiers.push(pattern);
            Ok(())
        } else {
            Err(CompileError::Unsupported(format!("member {accessor}")))
        }
    }

    /// Alias a property read through `member` is qualified with, joining every
    /// relation hop on the way.
    fn locate(&mut self, member: &Member) -> Result<JoinPath> {
        let Some(parent) = relation_parent(member) else {
            return Ok(JoinPath::root());
        };
        let parent_path = self.locate(parent)?;

        let column = self.metadata.resolve_column(&parent.accessor).ok_or_else(|| {
            CompileError::Unsupported(format!("relation {} has no column", parent.accessor))
        })?;
        let table = match parent.accessor.return_type.as_entity() {
            Some(entity) => self.metadata.resolve_table_name(entity)?,
            None => {
                return Err(CompileError::Unsupported(format!(
                    "relation {} does not return an item",
                    parent.accessor
                )));
            }
        };

        Ok(self
            .joins
            .traverse(&parent_path, &column, &table, self.dialect))
    }

    fn fold_and_bind(&mut self, expr: &Expr) -> Result<()> {
        let value = self.folder.fold(expr)?;
        debug!(
            expr = %expr.describe(),
            value = %value,
            consumed = ?self.folder.consumed(),
            "captured expression folded"
        );
        self.bind(value);
        Ok(())
    }

    fn bind(&mut self, value: Value) {
        let name = self.names.next();
        self.where_text.push_str(&self.dialect.placeholder(&name));

        let value = match self.modifiers.pop() {
            Some(pattern) => pattern.apply(value),
            None => value,
        };
        trace!(name = %name, value = %value, "parameter bound");
        self.parameters.insert(name, value);
    }

    fn push_operator(&mut self, symbol: &str) {
        self.where_text.push(' ');
        self.where_text.push_str(symbol);
        self.where_text.push(' ');
    }

    fn is_foldable(&self, expr: &Expr) -> bool {
        !self.depends_on_entity(expr) && !is_operator_call(expr)
    }

    fn depends_on_entity(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Parameter { index } => self.lambda.is_entity_slot(*index),
            Expr::Constant(_) => false,
            // a nested lambda reads its own scope
            Expr::Lambda(_) => false,
            Expr::Member(member) => self.depends_on_entity(&member.instance),
            Expr::Invocation(invocation) => {
                self.depends_on_entity(&invocation.target)
                    || invocation
                        .arguments
                        .iter()
                        .any(|argument| self.depends_on_entity(argument))
            }
            Expr::Binary { left, right, .. } => {
                self.depends_on_entity(left) || self.depends_on_entity(right)
            }
            Expr::Unary { operand, .. } => self.depends_on_entity(operand),
        }
    }
}

/// `equals` and the text-pattern methods translate to operators, never to values.
fn is_operator_call(expr: &Expr) -> bool {
    expr.as_call().is_some_and(|member| {
        member.accessor.is_equals() || LikePattern::for_accessor(&member.accessor).is_some()
    })
}

/// The relation getter `member` is read through, if its receiver is one.
fn relation_parent(member: &Member) -> Option<&Member> {
    let parent = strip_converts(&member.instance).as_call()?;
    parent.accessor.return_type.is_entity().then_some(parent)
}

fn strip_converts(mut expr: &Expr) -> &Expr {
    while let Expr::Unary {
        op: UnaryOp::Convert,
        operand,
    } = expr
    {
        expr = operand;
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::ConventionMetadata, query::dialect::FlexibleSearch};
    use expression_engine::MethodRegistry;
    use model::{
        core::{
            data_type::TypeRef,
            value::{Invocable, InvocationError, ObjectRef},
        },
        expr::build::{constant, param},
    };

    fn item() -> TypeRef {
        TypeRef::entity("TestItemModel")
    }

    fn getter(name: &str, ty: TypeRef) -> Accessor {
        Accessor::getter(item(), name, ty)
    }

    fn field(name: &str, ty: TypeRef) -> Expr {
        param(0).get(getter(name, ty))
    }

    fn compile(lambda: &Lambda) -> Result<TranslationResult> {
        let metadata = ConventionMetadata::default();
        let calls = MethodRegistry::new();
        let mut names = ParameterNameGenerator::new();
        QueryCompiler::new(lambda, &metadata, &calls, &FlexibleSearch, &mut names).compile()
    }

    struct Failing;

    impl Invocable for Failing {
        fn type_name(&self) -> &str {
            "Failing"
        }

        fn invoke(&self, _method: &str, _args: &[Value]) -> std::result::Result<Value, InvocationError> {
            Err("backend offline".into())
        }
    }

    #[test]
    fn test_lower_precedence_operand_is_grouped() {
        let body = field("getA", TypeRef::Integer)
            .equal(constant(1))
            .or(field("getB", TypeRef::Integer).equal(constant(2)))
            .and(field("getC", TypeRef::Integer).equal(constant(3)));
        let result = compile(&Lambda::predicate(item(), body)).unwrap();

        assert_eq!(
            result.where_text,
            "({this.a} = ?a OR {this.b} = ?b) AND {this.c} = ?c"
        );
    }

    #[test]
    fn test_converted_operand_is_grouped() {
        let either = field("getA", TypeRef::Integer)
            .equal(constant(1))
            .or(field("getB", TypeRef::Integer).equal(constant(2)));
        let body = either
            .convert()
            .and(field("getC", TypeRef::Integer).equal(constant(3)));
        let result = compile(&Lambda::predicate(item(), body)).unwrap();

        assert_eq!(
            result.where_text,
            "({this.a} = ?a OR {this.b} = ?b) AND {this.c} = ?c"
        );
    }

    #[test]
    fn test_unary_inside_folded_call_is_unsupported() {
        let concat = Accessor::method(TypeRef::Text, "concat", vec![TypeRef::Text], TypeRef::Text);
        let folded = param(1).call(concat, vec![param(2).not()]);
        let body = field("getString", TypeRef::Text).equals(folded);
        let lambda = Lambda::predicate(item(), body)
            .capture(TypeRef::Text, "abc")
            .capture(TypeRef::Boolean, true);
        let result = compile(&lambda);
        assert!(matches!(result, Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn test_boolean_getter_binds_true() {
        let body = field("isActive", TypeRef::Boolean);
        let result = compile(&Lambda::predicate(item(), body)).unwrap();

        assert_eq!(result.where_text, "{this.active} = ?a");
        assert_eq!(result.parameters.get("a"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_pattern_applies_to_folded_capture() {
        let body = field("getString", TypeRef::Text).ends_with(param(1));
        let lambda = Lambda::predicate(item(), body).capture(TypeRef::Text, "abc");
        let result = compile(&lambda).unwrap();

        assert_eq!(result.where_text, "{this.string} LIKE ?a");
        assert_eq!(result.parameters.get("a"), Some(&Value::from("%abc")));
    }

    #[test]
    fn test_constant_receiver_of_equals() {
        let body = constant("x").equals(field("getString", TypeRef::Text));
        let result = compile(&Lambda::predicate(item(), body)).unwrap();
        assert_eq!(result.where_text, "?a = {this.string}");
    }

    #[test]
    fn test_unknown_member_is_unsupported() {
        let upper = Accessor::getter(TypeRef::Text, "toUpperCase", TypeRef::Text);
        let body = field("getString", TypeRef::Text)
            .get(upper)
            .equal(constant("X"));
        let result = compile(&Lambda::predicate(item(), body));
        assert!(matches!(result, Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn test_unknown_unary_is_unsupported() {
        let body = field("getA", TypeRef::Integer).unary(UnaryOp::Other("Negate".to_string()));
        let result = compile(&Lambda::predicate(item(), body));
        assert!(matches!(result, Err(CompileError::Unsupported(_))));
    }

    #[test]
    fn test_failing_capture_is_evaluation_error() {
        let lookup = Accessor::getter(TypeRef::Object, "lookup", TypeRef::Text);
        let body = field("getString", TypeRef::Text).equals(param(1).get(lookup));
        let lambda =
            Lambda::predicate(item(), body).capture(TypeRef::Object, ObjectRef::new(Failing));
        let result = compile(&lambda);
        assert!(matches!(result, Err(CompileError::Evaluation(_))));
    }

    #[test]
    fn test_chain_of_relations_joins_each_hop() {
        let order = TypeRef::entity("OrderModel");
        let address = TypeRef::entity("AddressModel");
        let body = param(0)
            .get(Accessor::getter(order, "getDeliveryAddress", address.clone()))
            .get(Accessor::getter(address, "getCountry", TypeRef::entity("CountryModel")))
            .is_null();
        let result = compile(&Lambda::predicate(TypeRef::entity("OrderModel"), body)).unwrap();

        assert_eq!(result.where_text, "{thisdeliveryAddress.country} IS NULL");
        assert_eq!(result.joins.len(), 1);
        assert_eq!(result.joins[0].alias, "thisdeliveryAddress");
        assert_eq!(result.joins[0].table.name, "Address");
    }
}
