//! Text models: content a renderer draws as plain text or as mathematical
//! notation.

use crate::core::args::ConstructArgs;
use crate::core::class::ClassDef;
use crate::core::constraint::Constraint;
use crate::core::instance::ModelInstance;
use crate::core::property::PropertySpec;
use crate::core::registry::ClassRegistry;
use crate::domain::model::Value;
use crate::utils::error::Result;

pub const BASE_TEXT: &str = "BaseText";
pub const MATH_TEXT: &str = "MathText";
pub const ASCII: &str = "Ascii";
pub const MATHML: &str = "MathML";
pub const TEX: &str = "TeX";
pub const PLAIN_TEXT: &str = "PlainText";

/// Replacement text, or replacement text plus the macro's argument count.
pub fn macro_constraint() -> Constraint {
    Constraint::dict(
        Constraint::String,
        Constraint::either([
            Constraint::String,
            Constraint::tuple([Constraint::String, Constraint::Int]),
        ]),
    )
}

pub fn register_text_models(registry: &mut ClassRegistry) -> Result<()> {
    registry.define(
        ClassDef::new(BASE_TEXT)
            .abstract_class()
            .primary("text")
            .property(
                PropertySpec::new("text", Constraint::String)
                    .non_nullable()
                    .with_help("The text value to render."),
            ),
    )?;

    registry.define(ClassDef::new(MATH_TEXT).extends(BASE_TEXT).abstract_class())?;

    // AsciiMath notation
    registry.define(ClassDef::new(ASCII).extends(MATH_TEXT))?;
    registry.define(ClassDef::new(MATHML).extends(MATH_TEXT))?;

    registry.define(
        ClassDef::new(TEX).extends(MATH_TEXT).property(
            PropertySpec::new("macros", macro_constraint())
                .non_nullable()
                .with_default_factory(|| Value::Object(serde_json::Map::new()))
                .with_help(
                    "User defined TeX macros, keyed by control sequence name without the \
                     leading backslash. Each maps to a replacement string, or to a pair of \
                     replacement string and number of arguments.",
                ),
        ),
    )?;

    registry.define(ClassDef::new(PLAIN_TEXT).extends(BASE_TEXT))?;

    tracing::debug!("Registered text models");
    Ok(())
}

impl ClassRegistry {
    pub fn with_text_models() -> Result<Self> {
        let mut registry = Self::new();
        register_text_models(&mut registry)?;
        Ok(registry)
    }
}

/// `TeX(text)` with no macros.
pub fn tex(registry: &ClassRegistry, text: &str) -> Result<ModelInstance> {
    registry.construct(TEX, ConstructArgs::primary(text))
}

pub fn plain_text(registry: &ClassRegistry, text: &str) -> Result<ModelInstance> {
    registry.construct(PLAIN_TEXT, ConstructArgs::primary(text))
}
