//! Lowering of parsed JSON into replacement syntax.
//!
//! [`lower`] owns the recursion over the JSON shape; a [`JsonLowering`] policy
//! decides what each leaf and container turns into. [`ValueLowering`] builds
//! literal expressions, [`TypeLowering`] builds structural types.

use serde_json::{Number, Value};

use crate::emit::{Expr, TsType};

/// Per-variant conversion policy for [`lower`].
pub trait JsonLowering {
    type Output;

    fn string(&self, value: &str) -> Self::Output;
    fn number(&self, value: &Number) -> Self::Output;
    fn boolean(&self, value: bool) -> Self::Output;
    fn null(&self) -> Self::Output;
    /// A named binding whose key is missing from the document.
    fn absent(&self) -> Self::Output;
    fn array(&self, items: Vec<Self::Output>) -> Self::Output;
    fn object(&self, members: Vec<(String, Self::Output)>) -> Self::Output;
}

/// Fold `value` through `policy`. Object members keep document order.
pub fn lower<L: JsonLowering>(policy: &L, value: Option<&Value>) -> L::Output {
    match value {
        None => policy.absent(),
        Some(Value::Null) => policy.null(),
        Some(Value::Bool(b)) => policy.boolean(*b),
        Some(Value::Number(n)) => policy.number(n),
        Some(Value::String(s)) => policy.string(s),
        Some(Value::Array(items)) => {
            let items = items.iter().map(|item| lower(policy, Some(item))).collect();
            policy.array(items)
        }
        Some(Value::Object(map)) => {
            let members = map
                .iter()
                .map(|(key, item)| (key.clone(), lower(policy, Some(item))))
                .collect();
            policy.object(members)
        }
    }
}

/// Builds literal expressions for executable output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueLowering;

impl JsonLowering for ValueLowering {
    type Output = Expr;

    fn string(&self, value: &str) -> Expr {
        Expr::String(value.to_string())
    }

    fn number(&self, value: &Number) -> Expr {
        Expr::Number(number_literal(value))
    }

    fn boolean(&self, value: bool) -> Expr {
        Expr::Boolean(value)
    }

    fn null(&self) -> Expr {
        Expr::Null
    }

    fn absent(&self) -> Expr {
        Expr::Undefined
    }

    fn array(&self, items: Vec<Expr>) -> Expr {
        Expr::Array(items)
    }

    fn object(&self, members: Vec<(String, Expr)>) -> Expr {
        Expr::Object(members)
    }
}

/// Builds structural types for ambient declaration output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeLowering;

impl JsonLowering for TypeLowering {
    type Output = TsType;

    fn string(&self, _value: &str) -> TsType {
        TsType::String
    }

    fn number(&self, _value: &Number) -> TsType {
        TsType::Number
    }

    fn boolean(&self, value: bool) -> TsType {
        TsType::BooleanLiteral(value)
    }

    fn null(&self) -> TsType {
        TsType::Null
    }

    fn absent(&self) -> TsType {
        TsType::Undefined
    }

    fn array(&self, items: Vec<TsType>) -> TsType {
        TsType::Tuple(items)
    }

    fn object(&self, members: Vec<(String, TsType)>) -> TsType {
        TsType::Literal(members)
    }
}

/// Print a JSON number the way JavaScript's number-to-string conversion does
/// for the common cases: integral values drop the fraction (`1.0` -> `1`).
pub fn number_literal(value: &Number) -> String {
    if let Some(i) = value.as_i64() {
        return i.to_string();
    }
    if let Some(u) = value.as_u64() {
        return u.to_string();
    }
    match value.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) if f.abs() >= 1e21 => format!("{f:e}"),
        Some(f) => f.to_string(),
        None => value.to_string(),
    }
}
