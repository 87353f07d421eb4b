use crate::core::constraint::{describe_value, Constraint};
use crate::domain::model::Value;
use crate::utils::error::{ModelError, Result};
use std::fmt;

/// Where a property's value comes from when the constructor does not supply one.
#[derive(Clone)]
pub enum PropertyDefault {
    None,
    Value(Value),
    /// Called once per instance so mutable containers are never shared.
    Factory(fn() -> Value),
}

impl PropertyDefault {
    pub fn produce(&self) -> Option<Value> {
        match self {
            PropertyDefault::None => None,
            PropertyDefault::Value(v) => Some(v.clone()),
            PropertyDefault::Factory(f) => Some(f()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PropertyDefault::None)
    }
}

impl fmt::Debug for PropertyDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyDefault::None => write!(f, "None"),
            PropertyDefault::Value(v) => write!(f, "Value({})", v),
            PropertyDefault::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// Declarative metadata for one named, typed field of a model class.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    name: String,
    constraint: Constraint,
    nullable: bool,
    default: PropertyDefault,
    help: String,
}

impl PropertySpec {
    /// A nullable property with no default; it starts out as `null`.
    pub fn new(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            nullable: true,
            default: PropertyDefault::None,
            help: String::new(),
        }
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = PropertyDefault::Value(value);
        self
    }

    pub fn with_default_factory(mut self, factory: fn() -> Value) -> Self {
        self.default = PropertyDefault::Factory(factory);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default(&self) -> &PropertyDefault {
        &self.default
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// True when construction must be given an explicit value.
    pub fn is_required(&self) -> bool {
        !self.nullable && self.default.is_none()
    }

    /// Same constraint and nullability, so one may stand in for the other.
    pub fn is_compatible_with(&self, other: &PropertySpec) -> bool {
        self.constraint == other.constraint && self.nullable == other.nullable
    }

    /// Checks `value` against this property. `class` is only used to label errors.
    pub fn validate(&self, class: &str, value: &Value) -> Result<()> {
        if value.is_null() && self.nullable {
            return Ok(());
        }
        if self.constraint.accepts(value) {
            return Ok(());
        }
        Err(ModelError::TypeConstraint {
            class: class.to_string(),
            property: self.name.clone(),
            expected: self.describe_constraint(),
            actual: describe_value(value),
        })
    }

    /// Value an instance starts with when the constructor leaves this
    /// property unset, or `None` if the property is required.
    pub fn initial_value(&self) -> Option<Value> {
        match self.default.produce() {
            Some(v) => Some(v),
            None if self.nullable => Some(Value::Null),
            None => None,
        }
    }

    pub fn describe_constraint(&self) -> String {
        if self.nullable {
            format!("Nullable({})", self.constraint)
        } else {
            format!("NonNullable({})", self.constraint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nullable_accepts_null() {
        let spec = PropertySpec::new("label", Constraint::String);
        assert!(spec.validate("Axis", &Value::Null).is_ok());
        assert_eq!(spec.initial_value(), Some(Value::Null));
        assert!(!spec.is_required());
    }

    #[test]
    fn test_non_nullable_rejects_null() {
        let spec = PropertySpec::new("text", Constraint::String).non_nullable();
        let err = spec.validate("TeX", &Value::Null).unwrap_err();
        match err {
            ModelError::TypeConstraint {
                expected, actual, ..
            } => {
                assert_eq!(expected, "NonNullable(String)");
                assert_eq!(actual, "null");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(spec.is_required());
        assert_eq!(spec.initial_value(), None);
    }

    #[test]
    fn test_factory_default_is_fresh() {
        let spec = PropertySpec::new("macros", Constraint::dict(Constraint::String, Constraint::String))
            .non_nullable()
            .with_default_factory(|| json!({}));
        assert!(!spec.is_required());
        assert_eq!(spec.initial_value(), Some(json!({})));
        assert_eq!(format!("{:?}", spec.default()), "Factory(..)");
    }

    #[test]
    fn test_compatibility_ignores_default_and_help() {
        let a = PropertySpec::new("size", Constraint::Int).with_default(json!(1));
        let b = PropertySpec::new("size", Constraint::Int)
            .with_default(json!(2))
            .with_help("Larger");
        let c = PropertySpec::new("size", Constraint::Float);
        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
        assert!(!a.is_compatible_with(&b.clone().non_nullable()));
    }
}
