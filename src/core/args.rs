use crate::domain::model::Value;

/// Arguments for [`ModelInstance::construct`].
///
/// At most one positional value is meaningful: it binds to the class's
/// primary field. Everything else is passed by name.
///
/// [`ModelInstance::construct`]: crate::core::instance::ModelInstance::construct
#[derive(Debug, Clone, Default)]
pub struct ConstructArgs {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl ConstructArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single positional value, e.g. `TeX("x^2")`.
    pub fn primary(value: impl Into<Value>) -> Self {
        Self::new().arg(value)
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn named_values(&self) -> &[(String, Value)] {
        &self.named
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, Vec<(String, Value)>) {
        (self.positional, self.named)
    }
}
