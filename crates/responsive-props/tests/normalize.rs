//! Normalization of values trees against property schemas.

use responsive_props::{
    normalize, Breakpoint, NormalizeOptions, Schema, Value, Values,
};

// ============================================================================
// Helpers
// ============================================================================

fn schema(yaml: &str) -> Schema {
    Schema::from_yaml(yaml).expect("valid schema")
}

fn values(yaml: &str) -> Values {
    Values::from_yaml(yaml).expect("valid values")
}

fn fallback() -> NormalizeOptions {
    NormalizeOptions::default()
}

fn no_fallback() -> NormalizeOptions {
    NormalizeOptions::new().fallback_to_default(false)
}

fn at<'a>(values: &'a Values, bp: Breakpoint, key: &str) -> Option<&'a Value> {
    values.breakpoint_value(bp, key)
}

fn s(value: &str) -> Value {
    Value::from(value)
}

// ============================================================================
// Single values
// ============================================================================

#[test]
fn test_sets_default_to_missing_values() {
    let schema = schema(
        r#"
        prop_a: !prop
          type: string
          default: default value
        prop_b: !prop
          type: integer
          default: 100
        "#,
    );

    let normalized = normalize(&schema, values("prop_b: -1"), fallback());

    assert_eq!(normalized.get("prop_a"), Some(&s("default value")));
    assert_eq!(normalized.get("prop_b"), Some(&Value::Int(-1)));
}

#[test]
fn test_invalid_value_falls_back_to_default() {
    let schema = schema(
        r#"
        prop_a: !prop
          allowed_values: [a, b, c]
          default: a
        "#,
    );

    let normalized = normalize(&schema, values("prop_a: invalid"), fallback());

    assert_eq!(normalized, values("prop_a: a"));
}

// ============================================================================
// Fully responsive properties
// ============================================================================

#[test]
fn test_spreads_fully_responsive_values() {
    let schema = schema(
        r#"
        prop_a: !prop
          responsive: yes
          allowed_values: [a, b, c]
          default: a
        "#,
    );

    let normalized = normalize(&schema, values("prop_a: b"), fallback());

    assert!(
        !normalized.contains_key("prop_a"),
        "fully responsive base values move into breakpoints"
    );
    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_a"), Some(&s("b")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_a"), Some(&s("b")));
    assert!(
        at(&normalized, Breakpoint::Wide, "prop_a").is_none(),
        "optional breakpoints aren't added implicitly"
    );
}

#[test]
fn test_fully_responsive_defaults_without_input() {
    let schema = schema(
        r#"
        responsive_prop_c: !prop
          allowed_values: [a, b]
          responsive: yes
          whenNarrow:
            allowed_values: [n_a, n_b]
            default: n_a
          whenRegular:
            default: b
          whenWide:
            default: a
        "#,
    );

    let normalized = normalize(&schema, Values::new(), fallback());

    assert_eq!(
        normalized,
        values(
            r#"
            whenNarrow: { responsive_prop_c: n_a }
            whenRegular: { responsive_prop_c: b }
            whenWide: { responsive_prop_c: a }
            "#
        )
    );
}

#[test]
fn test_explicit_wide_value_is_kept_without_wide_default() {
    let schema = schema(
        r#"
        gap: !prop
          allowed_values: [none, normal]
          responsive: yes
          whenNarrow: { default: none }
          whenRegular: { default: normal }
        "#,
    );

    let normalized = normalize(
        &schema,
        values("whenWide: { gap: normal }"),
        fallback(),
    );

    assert_eq!(at(&normalized, Breakpoint::Narrow, "gap"), Some(&s("none")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "gap"), Some(&s("normal")));
    assert_eq!(at(&normalized, Breakpoint::Wide, "gap"), Some(&s("normal")));
}

// ============================================================================
// Transitional properties
// ============================================================================

#[test]
fn test_transitional_spreads_only_when_breakpoint_values_given() {
    let schema = schema(
        r#"
        prop_a: !prop
          responsive: transitional
          allowed_values: [a, b, c]
          default: a
        prop_b: !prop
          responsive: transitional
          allowed_values: [ta, tb, tc]
          default: tc
          whenNarrow: { default: ta }
          whenRegular: { default: tb }
        "#,
    );

    let normalized = normalize(
        &schema,
        values(
            r#"
            prop_a: b
            whenNarrow:
              prop_b: tc
            "#,
        ),
        fallback(),
    );

    assert_eq!(normalized.get("prop_a"), Some(&s("b")), "base values stay");
    assert!(at(&normalized, Breakpoint::Narrow, "prop_a").is_none());

    assert!(!normalized.contains_key("prop_b"));
    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_b"), Some(&s("tc")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_b"), Some(&s("tb")));
}

#[test]
fn test_transitional_base_default_unless_breakpoint_values_present() {
    let schema = schema(
        r#"
        prop_a: !prop
          responsive: transitional
          allowed_values: [t_default, t_narrow, t_regular, t_wide, t_extra, t_extra2]
          default: t_default
          whenNarrow: { default: t_narrow }
          whenRegular: { default: t_regular }
        "#,
    );

    let empty = normalize(&schema, Values::new(), fallback());
    assert_eq!(empty, values("prop_a: t_default"));

    let base_value = normalize(&schema, values("prop_a: t_extra"), fallback());
    assert_eq!(base_value, values("prop_a: t_extra"));

    let incomplete = normalize(
        &schema,
        values("whenNarrow: { prop_a: t_extra }"),
        fallback(),
    );
    assert!(!incomplete.contains_key("prop_a"));
    assert_eq!(at(&incomplete, Breakpoint::Narrow, "prop_a"), Some(&s("t_extra")));
    assert_eq!(at(&incomplete, Breakpoint::Regular, "prop_a"), Some(&s("t_regular")));

    let all = normalize(
        &schema,
        values(
            r#"
            whenNarrow: { prop_a: t_extra }
            whenRegular: { prop_a: t_extra2 }
            "#,
        ),
        fallback(),
    );
    assert!(!all.contains_key("prop_a"));
    assert_eq!(at(&all, Breakpoint::Narrow, "prop_a"), Some(&s("t_extra")));
    assert_eq!(at(&all, Breakpoint::Regular, "prop_a"), Some(&s("t_extra2")));
}

#[test]
fn test_transitional_base_value_fills_other_breakpoints() {
    let schema = schema(
        r#"
        direction: !prop
          responsive: transitional
          allowed_values: [block, inline]
          default: block
        "#,
    );

    let normalized = normalize(
        &schema,
        values(
            r#"
            direction: inline
            whenNarrow: { direction: block }
            "#,
        ),
        fallback(),
    );

    assert_eq!(
        normalized,
        values(
            r#"
            whenNarrow: { direction: block }
            whenRegular: { direction: inline }
            "#
        )
    );
}

// ============================================================================
// Fallback to defaults
// ============================================================================

#[test]
fn test_fallback_to_default_when_invalid_value_present() {
    let schema = schema(
        r#"
        prop_a: !prop
          responsive: no
          allowed_values: [a, b, c]
          default: a
        prop_r: !prop
          responsive: yes
          allowed_values: [ra, rb]
          whenNarrow:
            allowed_values: [rna, rnb]
            default: rnb
          whenRegular:
            allowed_values: [rra, rrb]
            default: rra
          whenWide:
            default: rb
        prop_t: !prop
          responsive: transitional
          allowed_values: [ta, tb, tc]
          default: tc
          whenNarrow: { default: ta }
          whenRegular: { default: tb }
        "#,
    );

    let normalized = normalize(
        &schema,
        values(
            r#"
            prop_a: invalid_value
            whenNarrow:
              prop_r: rra   # only available for regular
            whenRegular:
              prop_r: rc    # invalid everywhere
            whenWide:
              prop_r: rna   # only available for narrow
              prop_t: td    # invalid
            "#,
        ),
        fallback(),
    );

    let prop_r = schema.property("prop_r").unwrap();
    let prop_t = schema.property("prop_t").unwrap();

    assert_eq!(normalized.get("prop_a"), Some(&s("a")));

    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_r"), prop_r.default_value(Some(Breakpoint::Narrow)));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_r"), prop_r.default_value(Some(Breakpoint::Regular)));
    assert_eq!(at(&normalized, Breakpoint::Wide, "prop_r"), prop_r.default_value(Some(Breakpoint::Wide)));

    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_t"), Some(&s("ta")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_t"), Some(&s("tb")));
    assert_eq!(at(&normalized, Breakpoint::Wide, "prop_t"), prop_t.default_value(None));
}

#[test]
fn test_base_value_propagates_where_valid() {
    let schema = schema(
        r#"
        prop_r: !prop
          responsive: yes
          allowed_values: [ra, rb]
          whenNarrow:
            allowed_values: [rna, rnb]
            default: rnb
          whenRegular:
            allowed_values: [rra, rrb]
            default: rra
          whenWide:
            default: rb
        "#,
    );

    let normalized = normalize(&schema, values("prop_r: ra"), fallback());
    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_r"), Some(&s("ra")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_r"), Some(&s("ra")));
    assert_eq!(at(&normalized, Breakpoint::Wide, "prop_r"), Some(&s("ra")));

    // only valid at regular
    let normalized = normalize(&schema, values("prop_r: rrb"), fallback());
    assert_eq!(at(&normalized, Breakpoint::Narrow, "prop_r"), Some(&s("rnb")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "prop_r"), Some(&s("rrb")));
    assert_eq!(at(&normalized, Breakpoint::Wide, "prop_r"), Some(&s("rb")));
}

#[test]
fn test_invalid_values_kept_without_fallback() {
    let schema = schema(
        r#"
        gap: !prop
          allowed_values: [none, normal]
          responsive: yes
          whenNarrow: { default: none }
          whenRegular: { default: normal }
        "#,
    );

    let normalized = normalize(
        &schema,
        values("whenNarrow: { gap: huge }"),
        no_fallback(),
    );

    assert_eq!(at(&normalized, Breakpoint::Narrow, "gap"), Some(&s("huge")));
    assert_eq!(at(&normalized, Breakpoint::Regular, "gap"), Some(&s("normal")));
}

#[test]
fn test_deprecated_values_are_not_replaced() {
    let schema = schema(
        r#"
        prop_d: !prop
          allowed_values: [a, b]
          responsive: transitional
          default: a
          deprecation:
            deprecated_values: [aa, bb]
            warn_message: additional deprecation message
        "#,
    );

    let normalized = normalize(&schema, values("prop_d: aa"), fallback());
    assert_eq!(normalized.get("prop_d"), Some(&s("aa")));
}

// ============================================================================
// Namespaces
// ============================================================================

const DEEP_SCHEMA: &str = r#"
one_lvl_deep:
  prop_no: !prop
    type: string
    default: default value
  prop_responsive: !prop
    responsive: yes
    allowed_values: [a, b, c]
    whenNarrow: { default: a }
    whenRegular: { default: b }
  prop_transitional: !prop
    responsive: transitional
    type: number
    default: -1
multiple_lvls_deep:
  level_a:
    level_a_a:
      prop_no: !prop
        type: string
        default: default value
      prop_responsive: !prop
        responsive: yes
        allowed_values: [a, b, c]
        whenNarrow: { default: a }
        whenRegular: { default: b }
      prop_transitional: !prop
        responsive: transitional
        type: number
        default: -1
    level_a_b: !prop
      type: integer
      default: 100
  level_b:
    prop_no: !prop
      type: string
      default: default value
    prop_responsive: !prop
      responsive: yes
      allowed_values: [a, b, c]
      whenNarrow: { default: a }
      whenRegular: { default: b }
    prop_transitional: !prop
      responsive: transitional
      type: number
      default: -1
"#;

#[test]
fn test_normalizes_deep_namespaces() {
    let schema = schema(DEEP_SCHEMA);

    let normalized = normalize(
        &schema,
        values(
            r#"
            one_lvl_deep:
              prop_no: 10
              prop_transitional: invalid_value
            multiple_lvls_deep:
              level_b:
                prop_no: valid value
            whenNarrow:
              one_lvl_deep: { prop_responsive: c }
              multiple_lvls_deep:
                level_a:
                  level_a_a: { prop_responsive: invalid_value }
            whenRegular:
              one_lvl_deep: { prop_responsive: invalid_value }
            "#,
        ),
        fallback(),
    );

    let expected = values(
        r#"
        one_lvl_deep:
          prop_no: default value
          prop_transitional: -1
        multiple_lvls_deep:
          level_a:
            level_a_a:
              prop_no: default value
              prop_transitional: -1
            level_a_b: 100
          level_b:
            prop_no: valid value
            prop_transitional: -1
        whenNarrow:
          one_lvl_deep: { prop_responsive: c }
          multiple_lvls_deep:
            level_a:
              level_a_a: { prop_responsive: a }
            level_b: { prop_responsive: a }
        whenRegular:
          one_lvl_deep: { prop_responsive: b }
          multiple_lvls_deep:
            level_a:
              level_a_a: { prop_responsive: b }
            level_b: { prop_responsive: b }
        "#,
    );

    assert_eq!(normalized, expected);
}

#[test]
fn test_breakpoints_stay_at_outermost_level() {
    let schema = schema(DEEP_SCHEMA);
    let normalized = normalize(&schema, Values::new(), fallback());

    let level_b = normalized
        .map("multiple_lvls_deep")
        .and_then(|v| v.map("level_b"))
        .unwrap();
    assert!(!level_b.has_breakpoints());
    assert!(normalized.has_breakpoints());
}

#[test]
fn test_breakpoint_values_inside_namespace_are_hoisted() {
    let schema = schema(DEEP_SCHEMA);

    // breakpoint maps written inside the namespace are accepted too
    let normalized = normalize(
        &schema,
        values(
            r#"
            one_lvl_deep:
              whenNarrow: { prop_responsive: c }
            "#,
        ),
        fallback(),
    );

    assert!(!normalized.map("one_lvl_deep").unwrap().has_breakpoints());
    assert_eq!(
        normalized
            .breakpoint(Breakpoint::Narrow)
            .and_then(|v| v.map("one_lvl_deep"))
            .and_then(|v| v.get("prop_responsive")),
        Some(&s("c"))
    );
}

#[test]
fn test_namespaces_keep_their_position() {
    let schema = schema(DEEP_SCHEMA);

    let normalized = normalize(
        &schema,
        values(
            r#"
            one_lvl_deep:
              prop_no: first
            multiple_lvls_deep:
              level_b:
                prop_no: second
            "#,
        ),
        fallback(),
    );

    let keys: Vec<&str> = normalized.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["one_lvl_deep", "multiple_lvls_deep", "whenNarrow", "whenRegular"]
    );
    // namespaces missing from the input are appended
    let nested_keys: Vec<&str> = normalized
        .map("multiple_lvls_deep")
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(nested_keys, vec!["level_b", "level_a"]);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_normalization_is_idempotent_without_fallback() {
    let schema = schema(DEEP_SCHEMA);
    let input = values(
        r#"
        one_lvl_deep:
          prop_no: 10
        whenWide:
          one_lvl_deep: { prop_responsive: c }
        "#,
    );

    let once = normalize(&schema, input, no_fallback());
    let twice = normalize(&schema, once.clone(), no_fallback());
    assert_eq!(once, twice);
}
