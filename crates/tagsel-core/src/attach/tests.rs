use super::*;
use crate::error::TagselError;
use crate::tags::{AT_INSTALL, POST_INSTALL, STANDARD};

fn tags(items: &[&str]) -> TagSet {
    items.iter().copied().collect()
}

fn args(tokens: &[&str]) -> DecoratorArgs {
    DecoratorArgs::from_tokens(tokens)
}

#[test]
fn test_undecorated_class_gets_defaults() {
    let descriptor = inherit(&[], "sale");
    assert_eq!(descriptor.tags, TagSet::defaults());
    assert_eq!(descriptor.module, "sale");
    assert!(descriptor.explicit_tags.is_none());
}

#[test]
fn test_undecorated_subclass_inherits_nearest_base() {
    let near = attach(&args(&["slow"]), &[], "sale");
    let far = attach(&args(&["-standard"]), &[], "base");
    let descriptor = inherit(&[&near, &far], "sale_stock");
    assert_eq!(descriptor.tags, tags(&[STANDARD, AT_INSTALL, "slow"]));
    assert_eq!(descriptor.module, "sale_stock");
}

#[test]
fn test_positive_tokens_are_added() {
    let base = attach(&args(&["external"]), &[], "base");
    let descriptor = attach(&args(&["slow", "nightly"]), &[&base], "sale");
    assert_eq!(
        descriptor.tags,
        tags(&[STANDARD, AT_INSTALL, "external", "slow", "nightly"])
    );
}

#[test]
fn test_negative_tokens_are_removed() {
    let descriptor = attach(&args(&["-standard", "-at_install", "post_install"]), &[], "sale");
    assert_eq!(descriptor.tags, tags(&[POST_INSTALL]));

    for removed in ["standard", "at_install", "slow"] {
        let base = attach(&args(&["slow"]), &[], "base");
        let token = format!("-{}", removed);
        let descriptor = attach(&args(&[token.as_str()]), &[&base], "sale");
        assert!(!descriptor.tags.contains(removed), "{} still present", removed);
    }
}

#[test]
fn test_removing_absent_tag_is_noop() {
    let descriptor = attach(&args(&["-never_there"]), &[], "sale");
    assert_eq!(descriptor.tags, TagSet::defaults());
}

#[test]
fn test_repeated_tokens_are_idempotent() {
    let once = attach(&args(&["slow"]), &[], "sale");
    let twice = attach(&args(&["slow", "slow"]), &[], "sale");
    assert_eq!(once, twice);
}

#[test]
fn test_empty_decorator_reinstates_defaults() {
    let base = attach(&args(&["-standard"]), &[], "sale");
    assert!(!base.tags.contains(STANDARD));

    let child = attach(&DecoratorArgs::new(), &[&base], "sale");
    assert!(child.tags.contains(STANDARD));
    assert!(child.tags.contains(AT_INSTALL));
}

#[test]
fn test_non_empty_decorator_keeps_removed_default_removed() {
    let base = attach(&args(&["-standard"]), &[], "sale");
    let child = attach(&args(&["slow"]), &[&base], "sale");
    assert_eq!(child.tags, tags(&[AT_INSTALL, "slow"]));
}

#[test]
fn test_tokens_are_case_sensitive() {
    let descriptor = attach(&args(&["Slow", "-STANDARD"]), &[], "sale");
    assert!(descriptor.tags.contains("Slow"));
    assert!(!descriptor.tags.contains("slow"));
    assert!(descriptor.tags.contains(STANDARD));
}

#[test]
fn test_invalid_tokens_are_discarded() {
    let decorator = args(&["", "-", "two words", "ok", "-a,b"]);
    assert_eq!(decorator.tokens(), &[TagToken::Add("ok".to_string())]);
}

#[test]
fn test_token_display() {
    assert_eq!(TagToken::parse("slow").unwrap().to_string(), "slow");
    assert_eq!(TagToken::parse("-standard").unwrap().to_string(), "-standard");
}

#[test]
fn test_explicit_tags_override_everything() {
    let base = attach(&args(&["slow"]), &[], "base");
    let explicit = tags(&["only_this"]);
    let descriptor =
        attach(&args(&["nightly"]), &[&base], "sale").with_explicit_tags(explicit.clone());
    assert_eq!(descriptor.tags, explicit);
    assert_eq!(descriptor.explicit_tags, Some(explicit));
}

#[test]
fn test_registry_folds_stacked_decorators() {
    let mut registry = ClassRegistry::new();
    let definition = ClassDefinition::new("TestA", "sale")
        .with_decorator(["post_install", "-at_install"])
        .with_decorator(["slow"]);
    let descriptor = registry.define(&definition).unwrap();
    assert_eq!(descriptor.tags, tags(&[STANDARD, POST_INSTALL, "slow"]));
}

#[test]
fn test_registry_inherits_across_modules() {
    let mut registry = ClassRegistry::new();
    registry
        .define(&ClassDefinition::new("Common", "account").with_decorator(["-standard", "common"]))
        .unwrap();
    let descriptor = registry
        .define(&ClassDefinition::new("TestInvoice", "sale").with_base("account.Common"))
        .unwrap();
    assert_eq!(descriptor.tags, tags(&[AT_INSTALL, "common"]));
    assert_eq!(descriptor.module, "sale");
}

#[test]
fn test_registry_explicit_tags_are_inherited() {
    let mut registry = ClassRegistry::new();
    registry
        .define(
            &ClassDefinition::new("Base", "sale")
                .with_decorator(["slow"])
                .with_explicit_tags(tags(&["manual"])),
        )
        .unwrap();
    let child = registry
        .define(&ClassDefinition::new("Child", "sale").with_base("Base"))
        .unwrap();
    assert_eq!(child.tags, tags(&["manual"]));
    assert!(child.explicit_tags.is_none());
}

#[test]
fn test_registry_bare_name_prefers_own_module() {
    let mut registry = ClassRegistry::new();
    registry
        .define(&ClassDefinition::new("Common", "account").with_decorator(["acc"]))
        .unwrap();
    registry
        .define(&ClassDefinition::new("Common", "sale").with_decorator(["sal"]))
        .unwrap();
    let child = registry
        .define(&ClassDefinition::new("TestSale", "sale").with_base("Common"))
        .unwrap();
    assert!(child.tags.contains("sal"));

    let err = registry.resolve("Common", Some("stock")).unwrap_err();
    assert!(matches!(err, TagselError::AmbiguousClass { .. }));
}

#[test]
fn test_registry_rejects_unknown_base_and_duplicates() {
    let mut registry = ClassRegistry::new();
    let err = registry
        .define(&ClassDefinition::new("TestA", "sale").with_base("Missing"))
        .unwrap_err();
    assert!(matches!(err, TagselError::UnknownBaseClass { .. }));

    registry.define(&ClassDefinition::new("TestA", "sale")).unwrap();
    let err = registry
        .define(&ClassDefinition::new("TestA", "sale"))
        .unwrap_err();
    assert!(matches!(err, TagselError::DuplicateClass { .. }));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_decorator_args_deserialize_from_strings() {
    let decorator: DecoratorArgs = serde_json::from_str(r#"["-standard", "slow", ""]"#).unwrap();
    assert_eq!(
        decorator.tokens(),
        &[
            TagToken::Remove("standard".to_string()),
            TagToken::Add("slow".to_string())
        ]
    );
    assert_eq!(
        serde_json::to_string(&decorator).unwrap(),
        r#"["-standard","slow"]"#
    );
}
