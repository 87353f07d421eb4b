use anyhow::Result;
use plotmodel::core::Storage;
use plotmodel::{ClassRegistry, LocalStorage, ModelDocument, ModelError, ModelInstance};
use std::path::Path;
use tempfile::TempDir;

const AXIS_LABELS: &str = r#"
[[models]]
type = "TeX"
args = ['x\cdot\pi']

[[models]]
type = "TeX"
args = ['\sin(x)']

[models.properties]
macros = { RR = '{\bf R}' }
"#;

/// Load a document through storage, build it and write the serialized form back.
#[tokio::test]
async fn test_document_round_trip_through_storage() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = LocalStorage::new(temp_dir.path().to_string_lossy().into_owned());
    storage
        .write_file("labels.toml", AXIS_LABELS.as_bytes())
        .await?;

    let content = String::from_utf8(storage.read_file("labels.toml").await?)?;
    let document = ModelDocument::parse(Path::new("labels.toml"), &content)?;
    let registry = ClassRegistry::with_text_models()?;
    let instances = document.build(&registry)?;
    assert_eq!(instances.len(), 2);

    let rendered = ModelDocument::render(&instances, true)?;
    storage.write_file("out/labels.json", rendered.as_bytes()).await?;

    let written: serde_json::Value =
        serde_json::from_slice(&storage.read_file("out/labels.json").await?)?;
    assert_eq!(written[0]["type"], "TeX");
    assert_eq!(written[0]["attributes"]["text"], "x\\cdot\\pi");
    assert_eq!(written[1]["attributes"]["macros"]["RR"], "{\\bf R}");

    let rebuilt = written
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|value| ModelInstance::from_json(&registry, value))
        .collect::<plotmodel::Result<Vec<_>>>()?;
    assert_eq!(rebuilt, instances);
    Ok(())
}

#[test]
fn test_unknown_class_in_document() -> Result<()> {
    let document = ModelDocument::from_json_str(r#"{"models": [{"type": "Katex", "args": ["x"]}]}"#)?;
    let registry = ClassRegistry::with_text_models()?;

    let err = document.build(&registry).unwrap_err();
    assert!(matches!(
        err,
        ModelError::DocumentEntry { index: 0, ref source } if matches!(**source, ModelError::UnknownClass { .. })
    ));
    Ok(())
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = ModelDocument::from_toml_str("[[models]\ntype = ").unwrap_err();
    assert!(matches!(err, ModelError::ConfigError { .. }));
}
