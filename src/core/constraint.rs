//! Structural type constraints for property values.

use crate::domain::model::Value;
use std::fmt;

/// Shape a property value must have.
///
/// Checking is recursive: compound constraints delegate to their components,
/// `Either` stops at the first alternative that accepts, `Tuple`, `List` and
/// `Dict` stop at the first element that does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Any,
    Bool,
    Int,
    /// Any JSON number, integral or not.
    Float,
    String,
    /// A string drawn from a fixed set.
    Enum(Vec<String>),
    List(Box<Constraint>),
    Tuple(Vec<Constraint>),
    /// Keys are strings on the wire; the key constraint is checked against
    /// the key as a string value.
    Dict(Box<Constraint>, Box<Constraint>),
    Either(Vec<Constraint>),
}

impl Constraint {
    pub fn list(item: Constraint) -> Self {
        Constraint::List(Box::new(item))
    }

    pub fn dict(key: Constraint, value: Constraint) -> Self {
        Constraint::Dict(Box::new(key), Box::new(value))
    }

    pub fn tuple<I: IntoIterator<Item = Constraint>>(items: I) -> Self {
        Constraint::Tuple(items.into_iter().collect())
    }

    pub fn either<I: IntoIterator<Item = Constraint>>(alternatives: I) -> Self {
        Constraint::Either(alternatives.into_iter().collect())
    }

    pub fn enumeration<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::Enum(names.into_iter().map(Into::into).collect())
    }

    /// Whether `value` satisfies this constraint. `null` is never accepted
    /// here; nullability belongs to the property, not the constraint.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Constraint::Any => !value.is_null(),
            Constraint::Bool => value.is_boolean(),
            Constraint::Int => value.is_i64() || value.is_u64(),
            Constraint::Float => value.is_number(),
            Constraint::String => value.is_string(),
            Constraint::Enum(names) => value
                .as_str()
                .map(|s| names.iter().any(|n| n == s))
                .unwrap_or(false),
            Constraint::List(item) => value
                .as_array()
                .map(|items| items.iter().all(|v| item.accepts(v)))
                .unwrap_or(false),
            Constraint::Tuple(items) => match value.as_array() {
                Some(values) if values.len() == items.len() => {
                    items.iter().zip(values).all(|(c, v)| c.accepts(v))
                }
                _ => false,
            },
            Constraint::Dict(key, item) => value
                .as_object()
                .map(|map| {
                    map.iter()
                        .all(|(k, v)| key.accepts(&Value::String(k.clone())) && item.accepts(v))
                })
                .unwrap_or(false),
            Constraint::Either(alternatives) => alternatives.iter().any(|c| c.accepts(value)),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Any => write!(f, "Any"),
            Constraint::Bool => write!(f, "Bool"),
            Constraint::Int => write!(f, "Int"),
            Constraint::Float => write!(f, "Float"),
            Constraint::String => write!(f, "String"),
            Constraint::Enum(names) => write!(f, "Enum({})", names.join(", ")),
            Constraint::List(item) => write!(f, "List({})", item),
            Constraint::Tuple(items) => write!(f, "Tuple({})", join(items)),
            Constraint::Dict(key, item) => write!(f, "Dict({}, {})", key, item),
            Constraint::Either(alternatives) => write!(f, "Either({})", join(alternatives)),
        }
    }
}

fn join(constraints: &[Constraint]) -> String {
    constraints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Short description of a value's actual shape, for diagnostics.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) if n.is_f64() => format!("float {}", n),
        Value::Number(n) => format!("integer {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => {
            let shapes: Vec<String> = items.iter().map(describe_value).collect();
            format!("array [{}]", shapes.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{:?}: {}", k, describe_value(v)))
                .collect();
            format!("object {{{}}}", entries.join(", "))
        }
    }
}
