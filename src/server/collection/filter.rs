use chrono::{DateTime, Utc};
use entity::search;
use sea_orm::{sea_query::LikeExpr, ColumnTrait, Condition, Value};
use serde_json::Value as Json;

use crate::server::{
    collection::property::{CollectionProperties, ColumnOf, Field, FieldKind},
    error::collection::CollectionError,
};

/// A filter operand coerced to the field's type.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text.into(),
            Scalar::Integer(number) => number.into(),
            Scalar::Boolean(flag) => flag.into(),
            Scalar::Timestamp(at) => at.into(),
        }
    }
}

/// Parses a JSON filter object into a condition over `P`'s columns.
///
/// `{"field": value}` is equality. `{"field": {"$op": value, ...}}` applies each operator;
/// all clauses must hold.
///
/// # Returns
/// - `Ok(Condition)` - Conjunction of every clause
/// - `Err(CollectionError)` - Malformed JSON, unknown field, unsupported operator, or a value
///   that does not match the field type
pub fn parse_filter<P: CollectionProperties>(raw: &str) -> Result<Condition, CollectionError> {
    let parsed: Json = serde_json::from_str(raw)
        .map_err(|e| CollectionError::InvalidFilter(e.to_string()))?;

    let Json::Object(entries) = parsed else {
        return Err(CollectionError::InvalidFilter(format!(
            "got {}",
            json_type(&parsed)
        )));
    };

    let mut condition = Condition::all();

    for (name, value) in entries {
        let field = P::field(&name).ok_or_else(|| CollectionError::UnknownField(name.clone()))?;
        if !field.filterable {
            return Err(CollectionError::NotFilterable(name));
        }

        match value {
            Json::Object(operators) => {
                for (operator, operand) in operators {
                    condition = apply_operator::<P>(condition, field, &operator, operand)?;
                }
            }
            operand => {
                condition = condition.add(field.column.eq(coerce(field, operand)?));
            }
        }
    }

    Ok(condition)
}

fn apply_operator<P: CollectionProperties>(
    condition: Condition,
    field: &Field<ColumnOf<P>>,
    operator: &str,
    operand: Json,
) -> Result<Condition, CollectionError> {
    let column = field.column;
    let unsupported = || CollectionError::UnsupportedOperator {
        field: field.name.to_string(),
        operator: operator.to_string(),
    };

    // Booleans only compare for (in)equality.
    if field.kind == FieldKind::Boolean && !matches!(operator, "$eq" | "$ne") {
        return Err(unsupported());
    }

    let condition = match operator {
        "$eq" => condition.add(column.eq(coerce(field, operand)?)),
        "$ne" => condition.add(column.ne(coerce(field, operand)?)),
        "$gt" => condition.add(column.gt(coerce(field, operand)?)),
        "$gte" => condition.add(column.gte(coerce(field, operand)?)),
        "$lt" => condition.add(column.lt(coerce(field, operand)?)),
        "$lte" => condition.add(column.lte(coerce(field, operand)?)),
        "$in" => {
            let Json::Array(values) = operand else {
                return Err(CollectionError::InvalidValue {
                    field: field.name.to_string(),
                    expected: "an array",
                });
            };
            let values = values
                .into_iter()
                .map(|value| coerce(field, value))
                .collect::<Result<Vec<_>, _>>()?;
            condition.add(column.is_in(values))
        }
        "$contains" => {
            if field.kind != FieldKind::Text {
                return Err(unsupported());
            }
            let Scalar::Text(needle) = coerce(field, operand)? else {
                return Err(unsupported());
            };
            match field.search_column {
                Some(search_column) => {
                    condition.add(search_column.like(contains_pattern(&search::fold(&needle))))
                }
                // Unfolded columns only hold ASCII-cased values such as roles and emails.
                None => condition.add(column.like(contains_pattern(&needle))),
            }
        }
        _ => return Err(unsupported()),
    };

    Ok(condition)
}

/// `%needle%` with backslash, `%` and `_` escaped so the needle matches literally.
pub fn contains_pattern(needle: &str) -> LikeExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');

    LikeExpr::new(pattern).escape('\\')
}

fn coerce<C>(field: &Field<C>, value: Json) -> Result<Scalar, CollectionError> {
    let invalid = |expected| CollectionError::InvalidValue {
        field: field.name.to_string(),
        expected,
    };

    match field.kind {
        FieldKind::Text => match value {
            Json::String(text) => Ok(Scalar::Text(text)),
            _ => Err(invalid("a string")),
        },
        FieldKind::Integer => match value {
            Json::Number(number) => number
                .as_i64()
                .map(Scalar::Integer)
                .ok_or_else(|| invalid("an integer")),
            Json::String(text) => text
                .trim()
                .parse::<i64>()
                .map(Scalar::Integer)
                .map_err(|_| invalid("an integer")),
            _ => Err(invalid("an integer")),
        },
        FieldKind::Boolean => match value {
            Json::Bool(flag) => Ok(Scalar::Boolean(flag)),
            Json::String(text) if text == "true" => Ok(Scalar::Boolean(true)),
            Json::String(text) if text == "false" => Ok(Scalar::Boolean(false)),
            _ => Err(invalid("a boolean")),
        },
        FieldKind::Timestamp => match value {
            Json::String(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|at| Scalar::Timestamp(at.with_timezone(&Utc)))
                .map_err(|_| invalid("an RFC 3339 timestamp")),
            _ => Err(invalid("an RFC 3339 timestamp")),
        },
    }
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
