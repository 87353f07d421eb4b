use crate::core::property::PropertySpec;
use crate::utils::error::{ModelError, Result};
use crate::utils::validation::validate_identifier;
use std::collections::HashMap;
use std::sync::Arc;

/// Declaration of a model class, consumed by [`ClassRegistry::define`].
///
/// [`ClassRegistry::define`]: crate::core::registry::ClassRegistry::define
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub(crate) name: String,
    pub(crate) parent: Option<String>,
    pub(crate) is_abstract: bool,
    pub(crate) primary: Option<String>,
    pub(crate) properties: Vec<PropertySpec>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            is_abstract: false,
            primary: None,
            properties: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Field that a single positional constructor argument binds to.
    pub fn primary(mut self, field: impl Into<String>) -> Self {
        self.primary = Some(field.into());
        self
    }

    pub fn property(mut self, spec: PropertySpec) -> Self {
        self.properties.push(spec);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedProperty {
    pub spec: PropertySpec,
    /// Class that introduced the name; overrides keep the original owner.
    pub declared_on: String,
}

/// A model class with its full property table flattened in, ancestors first.
#[derive(Debug)]
pub struct ModelClass {
    name: String,
    parent: Option<Arc<ModelClass>>,
    is_abstract: bool,
    primary: Option<String>,
    own: Vec<String>,
    properties: Vec<ResolvedProperty>,
    index: HashMap<String, usize>,
}

impl ModelClass {
    /// Starts a class that inherits everything `parent` resolved.
    pub fn derive(name: &str, parent: Option<Arc<ModelClass>>, is_abstract: bool) -> Result<Self> {
        validate_identifier("class", name)?;

        let (properties, index, primary) = match &parent {
            Some(p) => (p.properties.clone(), p.index.clone(), p.primary.clone()),
            None => (Vec::new(), HashMap::new(), None),
        };

        Ok(Self {
            name: name.to_string(),
            parent,
            is_abstract,
            primary,
            own: Vec::new(),
            properties,
            index,
        })
    }

    /// Adds `spec` to this class.
    ///
    /// An inherited name may only be redeclared with the same constraint and
    /// nullability; that replaces the default and help in place.
    pub fn declare_property(&mut self, spec: PropertySpec) -> Result<()> {
        validate_identifier("property", spec.name())?;

        if let Some(default) = spec.default().produce() {
            spec.validate(&self.name, &default)?;
        }

        if self.own.iter().any(|n| n == spec.name()) {
            return Err(ModelError::DuplicateProperty {
                class: self.name.clone(),
                name: spec.name().to_string(),
                inherited_from: self.name.clone(),
            });
        }

        match self.index.get(spec.name()).copied() {
            Some(slot) => {
                let existing = &self.properties[slot];
                if !existing.spec.is_compatible_with(&spec) {
                    return Err(ModelError::DuplicateProperty {
                        class: self.name.clone(),
                        name: spec.name().to_string(),
                        inherited_from: existing.declared_on.clone(),
                    });
                }
                tracing::debug!(
                    "{} overrides '{}' inherited from {}",
                    self.name,
                    spec.name(),
                    existing.declared_on
                );
                self.own.push(spec.name().to_string());
                self.properties[slot].spec = spec;
            }
            None => {
                tracing::debug!(
                    "{} declares '{}': {}",
                    self.name,
                    spec.name(),
                    spec.describe_constraint()
                );
                self.own.push(spec.name().to_string());
                self.index.insert(spec.name().to_string(), self.properties.len());
                self.properties.push(ResolvedProperty {
                    declared_on: self.name.clone(),
                    spec,
                });
            }
        }
        Ok(())
    }

    pub fn set_primary(&mut self, field: &str) -> Result<()> {
        if !self.index.contains_key(field) {
            return Err(ModelError::UnknownProperty {
                class: self.name.clone(),
                name: field.to_string(),
            });
        }
        self.primary = Some(field.to_string());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ModelClass>> {
        self.parent.as_ref()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn primary_field(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertySpec> {
        self.properties.iter().map(|p| &p.spec)
    }

    pub fn resolved_properties(&self) -> &[ResolvedProperty] {
        &self.properties
    }

    /// Names declared (or overridden) by this class itself.
    pub fn own_properties(&self) -> &[String] {
        &self.own
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.index_of(name).map(|i| &self.properties[i].spec)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn lookup(&self, name: &str) -> Result<(usize, &PropertySpec)> {
        self.index_of(name)
            .map(|i| (i, &self.properties[i].spec))
            .ok_or_else(|| ModelError::UnknownProperty {
                class: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// This class followed by each ancestor up to the root.
    pub fn lineage(&self) -> impl Iterator<Item = &ModelClass> {
        std::iter::successors(Some(self), |&c| c.parent.as_deref())
    }

    pub fn is_subclass_of(&self, ancestor: &str) -> bool {
        self.lineage().any(|c| c.name == ancestor)
    }
}
