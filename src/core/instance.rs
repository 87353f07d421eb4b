use crate::core::args::ConstructArgs;
use crate::core::class::ModelClass;
use crate::core::registry::ClassRegistry;
use crate::domain::model::{SerializedModel, Value};
use crate::utils::error::{ModelError, Result};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// A validated object of a concrete model class.
///
/// Every stored value satisfies its property's constraint at all times:
/// construction either succeeds completely or returns an error, and a
/// rejected [`set`](Self::set) leaves the old value in place.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    class: Arc<ModelClass>,
    values: Vec<Value>,
}

impl ModelInstance {
    pub fn construct(class: &Arc<ModelClass>, args: ConstructArgs) -> Result<Self> {
        if class.is_abstract() {
            return Err(ModelError::AbstractInstantiation {
                class: class.name().to_string(),
            });
        }

        let (positional, mut named) = args.into_parts();
        match positional.len() {
            0 => {}
            1 => {
                let Some(primary) = class.primary_field() else {
                    return Err(ModelError::Arity {
                        class: class.name().to_string(),
                        expected: 0,
                        given: 1,
                    });
                };
                if named.iter().any(|(name, _)| name == primary) {
                    return Err(ModelError::ConflictingArgument {
                        class: class.name().to_string(),
                        name: primary.to_string(),
                    });
                }
                let value = positional.into_iter().next().unwrap_or(Value::Null);
                named.insert(0, (primary.to_string(), value));
            }
            given => {
                return Err(ModelError::Arity {
                    class: class.name().to_string(),
                    expected: usize::from(class.primary_field().is_some()),
                    given,
                });
            }
        }

        let mut explicit: Vec<Option<Value>> = vec![None; class.resolved_properties().len()];
        for (name, value) in named {
            let (slot, spec) = class.lookup(&name)?;
            if explicit[slot].is_some() {
                return Err(ModelError::ConflictingArgument {
                    class: class.name().to_string(),
                    name,
                });
            }
            spec.validate(class.name(), &value)?;
            explicit[slot] = Some(value);
        }

        let mut values = Vec::with_capacity(explicit.len());
        for (spec, value) in class.properties().zip(explicit) {
            match value.or_else(|| spec.initial_value()) {
                Some(v) => values.push(v),
                None => {
                    return Err(ModelError::MissingRequiredProperty {
                        class: class.name().to_string(),
                        name: spec.name().to_string(),
                    })
                }
            }
        }

        tracing::debug!("Constructed {} with {} properties", class.name(), values.len());
        Ok(Self {
            class: Arc::clone(class),
            values,
        })
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        let (slot, _) = self.class.lookup(name)?;
        Ok(&self.values[slot])
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let (slot, spec) = self.class.lookup(name)?;
        spec.validate(self.class.name(), &value)?;
        tracing::trace!("{}.{} = {}", self.class.name(), name, value);
        self.values[slot] = value;
        Ok(())
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.class.properties().map(|s| s.name()).zip(&self.values)
    }

    pub fn to_serialized(&self) -> SerializedModel {
        SerializedModel {
            r#type: self.class.name().to_string(),
            attributes: self
                .properties()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        let model = self.to_serialized();
        let mut object = serde_json::Map::new();
        object.insert("type".to_string(), Value::String(model.r#type));
        object.insert("attributes".to_string(), Value::Object(model.attributes));
        Value::Object(object)
    }

    /// Rebuilds an instance from its serialized form, applying the full
    /// construction checks to the attributes.
    pub fn from_json(registry: &ClassRegistry, value: Value) -> Result<Self> {
        let model: SerializedModel = serde_json::from_value(value)?;
        let class = registry.class(&model.r#type)?;
        let args = model
            .attributes
            .into_iter()
            .fold(ConstructArgs::new(), |args, (name, value)| args.named(name, value));
        Self::construct(&class, args)
    }
}

impl Serialize for ModelInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_serialized().serialize(serializer)
    }
}

impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.values == other.values
    }
}
