use crate::core::args::ConstructArgs;
use crate::core::class::{ClassDef, ModelClass};
use crate::core::instance::ModelInstance;
use crate::utils::error::{ModelError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// The set of model classes known to a program.
///
/// Classes are resolved once at definition time and shared read-only
/// afterwards, so a built registry can be used from any thread.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ModelClass>>,
    order: Vec<String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `def` against its already-defined parent and stores it.
    pub fn define(&mut self, def: ClassDef) -> Result<Arc<ModelClass>> {
        if self.classes.contains_key(&def.name) {
            return Err(ModelError::DuplicateClass { name: def.name });
        }

        let parent = def.parent.as_deref().map(|p| self.class(p)).transpose()?;
        let mut class = ModelClass::derive(&def.name, parent, def.is_abstract)?;
        for spec in def.properties {
            class.declare_property(spec)?;
        }
        if let Some(primary) = &def.primary {
            class.set_primary(primary)?;
        }

        tracing::debug!(
            "Defined {}{} with {} properties",
            if class.is_abstract() { "abstract " } else { "" },
            class.name(),
            class.resolved_properties().len()
        );

        let class = Arc::new(class);
        self.order.push(def.name.clone());
        self.classes.insert(def.name, Arc::clone(&class));
        Ok(class)
    }

    pub fn class(&self, name: &str) -> Result<Arc<ModelClass>> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::UnknownClass {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Classes in definition order.
    pub fn classes(&self) -> impl Iterator<Item = &Arc<ModelClass>> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    pub fn concrete_classes(&self) -> impl Iterator<Item = &Arc<ModelClass>> {
        self.classes().filter(|c| !c.is_abstract())
    }

    pub fn is_abstract(&self, name: &str) -> Result<bool> {
        Ok(self.class(name)?.is_abstract())
    }

    pub fn is_subclass(&self, child: &str, ancestor: &str) -> Result<bool> {
        self.class(ancestor)?;
        Ok(self.class(child)?.is_subclass_of(ancestor))
    }

    pub fn construct(&self, name: &str, args: ConstructArgs) -> Result<ModelInstance> {
        ModelInstance::construct(&self.class(name)?, args)
    }
}
