use crate::domain::model::{AttributeValue, InputValue, Operator, OperatorId, PropertyType};
use regex::Regex;
use std::sync::LazyLock;

// `in` 的分隔符：逗號，前後可有空白
static IN_DELIMITER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());

const NUMERIC_OPERATORS: &[OperatorId] = &[
    OperatorId::Equals,
    OperatorId::Any,
    OperatorId::None,
    OperatorId::In,
    OperatorId::GreaterThan,
    OperatorId::LessThan,
];

const ENUMERATED_OPERATORS: &[OperatorId] = &[
    OperatorId::Equals,
    OperatorId::Any,
    OperatorId::None,
    OperatorId::In,
];

const FREE_TEXT_OPERATORS: &[OperatorId] = &[
    OperatorId::Equals,
    OperatorId::Any,
    OperatorId::None,
    OperatorId::In,
    OperatorId::Contains,
];

pub fn available_operators(kind: PropertyType) -> &'static [OperatorId] {
    match kind {
        PropertyType::Numeric => NUMERIC_OPERATORS,
        PropertyType::Enumerated => ENUMERATED_OPERATORS,
        PropertyType::FreeText => FREE_TEXT_OPERATORS,
    }
}

pub fn is_available(operator: OperatorId, kind: PropertyType) -> bool {
    available_operators(kind).contains(&operator)
}

/// 從資料來源的運算子清單中挑出此型別可用者，保留原本順序
pub fn candidate_operators(catalog: &[Operator], kind: PropertyType) -> Vec<Operator> {
    catalog
        .iter()
        .filter(|op| is_available(op.id, kind))
        .cloned()
        .collect()
}

/// Applies `operator` to a single attribute value.
///
/// `any` and `none` are presence tests: callers only reach them for an
/// attribute that exists, so `any` holds and `none` does not.
pub fn evaluate(operator: OperatorId, value: &AttributeValue, input: &InputValue) -> bool {
    match operator {
        OperatorId::Equals => equals(value, input),
        OperatorId::GreaterThan => compare(value, input, |a, b| a > b),
        OperatorId::LessThan => compare(value, input, |a, b| a < b),
        OperatorId::Any => true,
        OperatorId::None => false,
        OperatorId::In => is_in(value, input),
        OperatorId::Contains => contains(value, input),
    }
}

fn equals(value: &AttributeValue, input: &InputValue) -> bool {
    match (value, input) {
        (AttributeValue::Number(a), InputValue::Number(b)) => a == b,
        (AttributeValue::Text(a), InputValue::Text(b)) => a == b,
        (AttributeValue::Text(a), InputValue::List(items)) if items.len() == 1 => *a == items[0],
        _ => false,
    }
}

fn compare(value: &AttributeValue, input: &InputValue, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (value.as_number(), input.as_number()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn is_in(value: &AttributeValue, input: &InputValue) -> bool {
    match input {
        InputValue::List(items) => match value {
            AttributeValue::Text(a) => items.iter().any(|item| item == a),
            AttributeValue::Number(_) => false,
        },
        other => {
            let needle = value.to_string();
            let haystack = other.to_string();
            IN_DELIMITER
                .split(haystack.trim())
                .filter(|token| !token.is_empty())
                .any(|token| token == needle)
        }
    }
}

fn contains(value: &AttributeValue, input: &InputValue) -> bool {
    value
        .to_string()
        .to_lowercase()
        .contains(&input.to_string().to_lowercase())
}
