use anyhow::Result;
use plotmodel::core::text::{ASCII, BASE_TEXT, MATHML, MATH_TEXT, PLAIN_TEXT, TEX};
use plotmodel::{ClassDef, ClassRegistry, Constraint, ConstructArgs, ModelError, PropertySpec};
use serde_json::json;

fn registry() -> Result<ClassRegistry> {
    Ok(ClassRegistry::with_text_models()?)
}

#[test]
fn test_missing_required_text() -> Result<()> {
    let registry = registry()?;
    for name in [ASCII, MATHML, TEX, PLAIN_TEXT] {
        let err = registry.construct(name, ConstructArgs::new()).unwrap_err();
        match err {
            ModelError::MissingRequiredProperty { class, name: field } => {
                assert_eq!(class, name);
                assert_eq!(field, "text");
            }
            other => panic!("{name}: unexpected error {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn test_abstract_classes_never_construct() -> Result<()> {
    let registry = registry()?;
    let attempts = [
        ConstructArgs::new(),
        ConstructArgs::primary("x"),
        ConstructArgs::new().named("text", "x"),
        ConstructArgs::new().arg("a").arg("b"),
        ConstructArgs::new().named("bogus", 1),
    ];
    for name in [BASE_TEXT, MATH_TEXT] {
        for args in attempts.iter().cloned() {
            assert!(matches!(
                registry.construct(name, args),
                Err(ModelError::AbstractInstantiation { .. })
            ));
        }
    }
    Ok(())
}

#[test]
fn test_positional_shortcut_matches_named_text() -> Result<()> {
    let registry = registry()?;
    let positional = registry.construct(TEX, ConstructArgs::primary("x^2"))?;
    let named = registry.construct(TEX, ConstructArgs::new().named("text", "x^2"))?;

    assert_eq!(positional.get("text")?, &json!("x^2"));
    assert_eq!(positional, named);
    assert_eq!(positional.to_json(), named.to_json());
    Ok(())
}

#[test]
fn test_positional_and_named_text_conflict() -> Result<()> {
    let registry = registry()?;
    let err = registry
        .construct(TEX, ConstructArgs::primary("a").named("text", "b"))
        .unwrap_err();
    assert!(matches!(err, ModelError::ConflictingArgument { ref name, .. } if name == "text"));
    Ok(())
}

#[test]
fn test_two_positionals_is_arity_error() -> Result<()> {
    let registry = registry()?;
    let err = registry
        .construct(PLAIN_TEXT, ConstructArgs::new().arg("a").arg("b"))
        .unwrap_err();
    assert!(matches!(err, ModelError::Arity { expected: 1, given: 2, .. }));
    Ok(())
}

#[test]
fn test_tex_macros_compound_constraint() -> Result<()> {
    let registry = registry()?;
    let mut tex = registry.construct(TEX, ConstructArgs::primary(r"\RR \rightarrow \RR^2"))?;
    assert_eq!(tex.get("macros")?, &json!({}));

    tex.set("macros", json!({"RR": "{\\bf R}"}))?;
    tex.set("macros", json!({"RR": ["{\\bf R}", 2]}))?;
    assert_eq!(tex.get("macros")?, &json!({"RR": ["{\\bf R}", 2]}));

    match tex.set("macros", json!({"RR": 5})).unwrap_err() {
        ModelError::TypeConstraint {
            property,
            expected,
            actual,
            ..
        } => {
            assert_eq!(property, "macros");
            assert_eq!(
                expected,
                "NonNullable(Dict(String, Either(String, Tuple(String, Int))))"
            );
            assert_eq!(actual, "object {\"RR\": integer 5}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(tex.get("macros")?, &json!({"RR": ["{\\bf R}", 2]}));
    Ok(())
}

#[test]
fn test_macros_validated_at_construction() -> Result<()> {
    let registry = registry()?;
    let err = registry
        .construct(
            TEX,
            ConstructArgs::primary("x").named("macros", json!({"RR": ["{\\bf R}", "two"]})),
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::TypeConstraint { .. }));
    Ok(())
}

#[test]
fn test_text_rejects_null_and_non_strings() -> Result<()> {
    let registry = registry()?;
    let mut text = registry.construct(ASCII, ConstructArgs::primary("sum_(i=1)^n i"))?;
    assert!(matches!(
        text.set("text", json!(null)),
        Err(ModelError::TypeConstraint { .. })
    ));
    assert!(matches!(
        text.set("text", 42),
        Err(ModelError::TypeConstraint { .. })
    ));
    Ok(())
}

#[test]
fn test_get_is_stable_between_sets() -> Result<()> {
    let registry = registry()?;
    let mut text = registry.construct(MATHML, ConstructArgs::primary("<mi>x</mi>"))?;
    text.set("text", "<mn>2</mn>")?;
    for _ in 0..3 {
        assert_eq!(text.get("text")?, &json!("<mn>2</mn>"));
    }
    text.set("text", "<mn>3</mn>")?;
    assert_eq!(text.get("text")?, &json!("<mn>3</mn>"));
    Ok(())
}

#[test]
fn test_unknown_property_on_every_class() -> Result<()> {
    let registry = registry()?;
    for class in registry.concrete_classes() {
        let mut instance =
            plotmodel::ModelInstance::construct(class, ConstructArgs::primary("x"))?;
        assert!(matches!(
            instance.set("bogus", 1),
            Err(ModelError::UnknownProperty { .. })
        ));
        assert!(matches!(
            instance.get("bogus"),
            Err(ModelError::UnknownProperty { .. })
        ));
    }

    let err = registry
        .construct(TEX, ConstructArgs::primary("x").named("bogus", 1))
        .unwrap_err();
    assert!(matches!(err, ModelError::UnknownProperty { .. }));
    Ok(())
}

#[test]
fn test_user_subclass_of_text_model() -> Result<()> {
    let mut registry = registry()?;
    registry.define(
        ClassDef::new("Label").extends(PLAIN_TEXT).property(
            PropertySpec::new("align", Constraint::enumeration(["left", "center", "right"]))
                .non_nullable()
                .with_default(json!("left")),
        ),
    )?;

    let label = registry.construct("Label", ConstructArgs::primary("Sprint times"))?;
    assert_eq!(label.get("align")?, &json!("left"));
    assert!(registry.is_subclass("Label", BASE_TEXT)?);

    let clash = ClassDef::new("BadLabel")
        .extends(TEX)
        .property(PropertySpec::new("macros", Constraint::List(Box::new(Constraint::String))));
    assert!(matches!(
        registry.define(clash),
        Err(ModelError::DuplicateProperty { ref inherited_from, .. }) if inherited_from == TEX
    ));
    Ok(())
}
