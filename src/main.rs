use clap::Parser;
use plotmodel::core::Storage;
use plotmodel::utils::error::ErrorSeverity;
use plotmodel::utils::{logger, validation::Validate};
use plotmodel::{ClassRegistry, CliConfig, LocalStorage, ModelDocument, ModelError};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting plotmodel CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match run(&config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!(
                "❌ plotmodel failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run(config: &CliConfig) -> Result<(), ModelError> {
    let registry = ClassRegistry::with_text_models()?;
    let storage = LocalStorage::new(".".to_string());

    if config.list_classes {
        print!("{}", describe_classes(&registry));
    }

    let Some(document_path) = &config.document else {
        return Ok(());
    };

    tracing::info!("📁 Loading models from: {}", document_path);
    let content = storage.read_file(document_path).await?;
    let content = String::from_utf8(content).map_err(|e| ModelError::ConfigError {
        message: format!("{} is not valid UTF-8: {}", document_path, e),
    })?;

    let document = ModelDocument::parse(Path::new(document_path), &content)?;
    let instances = document.build(&registry)?;
    let rendered = ModelDocument::render(&instances, config.pretty)?;

    match &config.output {
        Some(output) => {
            storage.write_file(output, rendered.as_bytes()).await?;
            tracing::info!("✅ Wrote {} models to {}", instances.len(), output);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn describe_classes(registry: &ClassRegistry) -> String {
    let mut out = String::new();
    for class in registry.classes() {
        let kind = if class.is_abstract() { " (abstract)" } else { "" };
        match class.parent() {
            Some(parent) => out.push_str(&format!("{}({}){}\n", class.name(), parent.name(), kind)),
            None => out.push_str(&format!("{}{}\n", class.name(), kind)),
        }
        for resolved in class.resolved_properties() {
            let spec = &resolved.spec;
            let primary = if class.primary_field() == Some(spec.name()) {
                " [primary]"
            } else {
                ""
            };
            out.push_str(&format!(
                "    {}: {}{}",
                spec.name(),
                spec.describe_constraint(),
                primary
            ));
            if resolved.declared_on != class.name() {
                out.push_str(&format!(" (from {})", resolved.declared_on));
            }
            out.push('\n');
            if !spec.help().is_empty() {
                out.push_str(&format!("        {}\n", spec.help()));
            }
        }
    }
    out
}
