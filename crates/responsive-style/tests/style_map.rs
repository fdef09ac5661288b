//! Loading style-class maps and resolving values against them.

use std::io::Write;

use once_cell::sync::Lazy;
use responsive_props::{Breakpoint, Value, Values};
use responsive_style::{
    apply_values_to_style_map, declare_style_class_map, AppliedClass, ClassEntry, StyleClassMap,
    StyleMapError,
};

static CARD_YAML: &str = r#"
padding:
  none: Card--padding-none
  normal: Card--padding-normal
elevated: Card--elevated
header:
  divider: Card--header-divider
  align:
    start: Card--header-start
    center: Card--header-center
"#;

static CARD: Lazy<StyleClassMap> = Lazy::new(|| {
    let declared = StyleClassMap::from_yaml(CARD_YAML).expect("valid class map");
    declare_style_class_map(
        StyleClassMap::new().with("elevated", declared.get("elevated").cloned().expect("elevated")),
        StyleClassMap::new().with("padding", declared.get("padding").cloned().expect("padding")),
        StyleClassMap::new().with("header", declared.get("header").cloned().expect("header")),
    )
});

fn values(yaml: &str) -> Values {
    Values::from_yaml(yaml).expect("valid values")
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CARD_YAML.as_bytes()).unwrap();

    let map = StyleClassMap::from_file(file.path()).unwrap();
    assert_eq!(map, StyleClassMap::from_yaml(CARD_YAML).unwrap());
    assert!(!map.has_responsive_variants());
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    let err = StyleClassMap::from_file(&path).unwrap_err();
    match err {
        StyleMapError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected io error, got {:?}", other),
    }
}

#[test]
fn test_numeric_value_keys() {
    let map = StyleClassMap::from_yaml(
        r#"
        columns:
          2: Grid--cols-2
          3: Grid--cols-3
        whenNarrow:
          columns:
            1: Grid--cols-1-whenNarrow
        "#,
    )
    .unwrap();

    let applied = apply_values_to_style_map(
        &map,
        &Values::new()
            .with("columns", Value::Int(2))
            .with_breakpoint(Breakpoint::Narrow, Values::new().with("columns", 1)),
    );
    assert_eq!(applied.class_list(), "Grid--cols-2 Grid--cols-1-whenNarrow");
}

#[test]
fn test_numeric_keys_in_loaded_values() {
    let map = StyleClassMap::from_yaml("grid:\n  columns:\n    2: Grid--cols-2\n").unwrap();
    let values = values("grid:\n  columns: 2\n  4: ignored\n");

    assert_eq!(apply_values_to_style_map(&map, &values).class_list(), "Grid--cols-2");
}

#[test]
fn test_empty_document_is_empty_map() {
    assert!(StyleClassMap::from_yaml("").unwrap().is_empty());
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn test_merge_replaces_base_and_merges_breakpoints() {
    let base = StyleClassMap::new()
        .with("padding", ClassEntry::classes([("none", "p-0"), ("normal", "p-4")]))
        .add_responsive_variants(false);
    let overrides = StyleClassMap::new()
        .with("padding", ClassEntry::classes([("large", "p-8")]))
        .with_breakpoint(
            Breakpoint::Narrow,
            "padding",
            ClassEntry::classes([("large", "p-8-narrow")]),
        );

    let merged = base.merge(&overrides);

    let padding = merged.get("padding").and_then(ClassEntry::as_map).unwrap();
    assert_eq!(padding.len(), 1);

    let narrow = merged.breakpoint(Breakpoint::Narrow).unwrap()["padding"]
        .as_map()
        .unwrap();
    assert_eq!(narrow["normal"].as_class(), Some("p-4-whenNarrow"));
    assert_eq!(narrow["large"].as_class(), Some("p-8-narrow"));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_general_classes_ignore_breakpoints() {
    let applied = apply_values_to_style_map(
        &CARD,
        &values("elevated: true\nwhenNarrow:\n  elevated: false"),
    );
    assert_eq!(applied.class_list(), "Card--elevated");
}

#[test]
fn test_responsive_classes_use_base_for_required_breakpoints() {
    let applied = apply_values_to_style_map(&CARD, &values("padding: none"));
    assert_eq!(
        applied.class_list(),
        "Card--padding-none-whenNarrow Card--padding-none-whenRegular"
    );
}

#[test]
fn test_nested_values_resolve_key_by_key() {
    let applied = apply_values_to_style_map(
        &CARD,
        &values(
            r#"
            header:
              divider: true
              align: center
            whenWide:
              header:
                align: start
            "#,
        ),
    );

    match applied.get("header") {
        Some(AppliedClass::Map(header)) => {
            assert_eq!(
                header["divider"].as_class(),
                Some("Card--header-divider Card--header-divider-whenNarrow Card--header-divider-whenRegular")
            );
            assert_eq!(
                header["align"].as_class(),
                Some("Card--header-center Card--header-center-whenNarrow Card--header-center-whenRegular Card--header-start-whenWide")
            );
        }
        other => panic!("expected nested classes, got {:?}", other),
    }
}

#[test]
fn test_unknown_values_resolve_to_nothing() {
    let applied = apply_values_to_style_map(
        &CARD,
        &Values::new()
            .with("padding", "enormous")
            .with("elevated", Value::from(false)),
    );
    assert!(applied.is_empty());
}
