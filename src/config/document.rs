use crate::core::args::ConstructArgs;
use crate::core::instance::ModelInstance;
use crate::core::registry::ClassRegistry;
use crate::domain::model::Value;
use crate::utils::error::{ModelError, Result};
use crate::utils::validation::{validate_identifier, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A list of models to construct, written as TOML or JSON.
///
/// ```toml
/// [[models]]
/// type = "TeX"
/// args = ["x^2"]
///
/// [models.properties]
/// macros = { RR = "{\\bf R}" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub r#type: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl ModelEntry {
    pub fn to_args(&self) -> ConstructArgs {
        let args = self
            .args
            .iter()
            .cloned()
            .fold(ConstructArgs::new(), |args, value| args.arg(value));
        self.properties
            .iter()
            .fold(args, |args, (name, value)| args.named(name.clone(), value.clone()))
    }
}

impl ModelDocument {
    /// Loads a document, choosing the format by file extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ModelError::IoError)?;
        Self::parse(path.as_ref(), &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(content),
            _ => Self::from_toml_str(content),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ModelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ModelError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Constructs every entry in order, stopping at the first failure.
    pub fn build(&self, registry: &ClassRegistry) -> Result<Vec<ModelInstance>> {
        self.validate()?;

        let instances = self
            .models
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                registry
                    .construct(&entry.r#type, entry.to_args())
                    .map_err(|e| e.in_entry(index))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Built {} models", instances.len());
        Ok(instances)
    }

    pub fn render(instances: &[ModelInstance], pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(instances)?
        } else {
            serde_json::to_string(instances)?
        };
        Ok(rendered)
    }
}

impl Validate for ModelDocument {
    fn validate(&self) -> Result<()> {
        for (index, entry) in self.models.iter().enumerate() {
            validate_identifier(&format!("models[{}].type", index), &entry.r#type)?;
        }
        Ok(())
    }
}
