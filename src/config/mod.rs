pub mod cli;
pub mod document;

#[cfg(feature = "cli")]
use crate::utils::error::{ModelError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "plotmodel")]
#[command(about = "Build and validate plot model documents")]
pub struct CliConfig {
    /// TOML or JSON document listing the models to build
    #[arg(short, long)]
    pub document: Option<String>,

    /// Write the serialized models here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print every registered model class with its properties
    #[arg(long)]
    pub list_classes: bool,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.document {
            Some(document) => {
                validate_path("document", document)?;
                validate_file_extension("document", document, &["toml", "json"])?;
            }
            None if !self.list_classes => {
                return Err(ModelError::ConfigError {
                    message: "either --document or --list-classes is required".to_string(),
                });
            }
            None => {}
        }

        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}
