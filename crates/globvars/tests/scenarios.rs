//! End-to-end rewriting scenarios.

use globvars::{GlobalVars, GlobalVarsError, Options, ResolveError, Table, VarNode};

fn vars(data: serde_json::Value) -> GlobalVars {
    GlobalVars::with_data(table(data)).unwrap()
}

fn table(data: serde_json::Value) -> Table {
    serde_json::from_value(data).unwrap()
}

// ============================================================================
// Plain properties
// ============================================================================

#[test]
fn injects_top_level_variable() {
    let vars = vars(serde_json::json!({ "color": "red" }));
    assert_eq!(vars.rewrite("$global.color").unwrap(), "red");
}

#[test]
fn leaves_other_variables_alone() {
    let vars = vars(serde_json::json!({ "color": "red" }));
    assert_eq!(vars.rewrite("$color").unwrap(), "$color");
}

#[test]
fn unknown_variable_is_an_error() {
    let vars = vars(serde_json::json!({}));
    assert_eq!(
        vars.rewrite("$global.color").unwrap_err().to_string(),
        "Property \"color\" is not defined."
    );
}

#[test]
fn custom_prefix() {
    let options = Options::new(table(serde_json::json!({ "color": "red" }))).with_prefix("--const-");
    let vars = GlobalVars::new(options).unwrap();
    assert_eq!(vars.rewrite("--const-color").unwrap(), "red");
}

// ============================================================================
// Nested properties
// ============================================================================

#[test]
fn injects_nested_variable() {
    let vars = vars(serde_json::json!({ "colors": { "primary": "red" } }));
    assert_eq!(vars.rewrite("$global.colors.primary").unwrap(), "red");
}

#[test]
fn unknown_nested_variable_names_the_missing_prefix() {
    let vars = vars(serde_json::json!({ "colors": { "primary": "red" } }));
    assert_eq!(
        vars.rewrite("$global.colors.secondary").unwrap_err().to_string(),
        "Property \"colors.secondary\" is not defined."
    );
}

#[test]
fn number_value() {
    let vars = vars(serde_json::json!({ "aspect-ratios": { "video-height": 0.5625 } }));
    assert_eq!(
        vars.rewrite("calc($global.aspect-ratios.video-height * 1%)")
            .unwrap(),
        "calc(0.5625 * 1%)"
    );
}

#[test]
fn table_value_is_an_error() {
    let vars = vars(serde_json::json!({ "colors": { "primary": "red" } }));
    assert_eq!(
        vars.rewrite("$global.colors").unwrap_err().to_string(),
        "The \"colors\" property has an inappropriate type."
    );
}

#[test]
fn custom_prefix_nested() {
    let options = Options::new(table(serde_json::json!({ "colors": { "primary": "red" } })))
        .with_prefix("--const-");
    let vars = GlobalVars::new(options).unwrap();
    assert_eq!(vars.rewrite("--const-colors.primary").unwrap(), "red");
}

#[test]
fn several_references_per_value() {
    let vars = vars(serde_json::json!({
        "padding": { "vertical": "50px", "horizontal": "100px" }
    }));
    assert_eq!(
        vars.rewrite("$global.padding.vertical $global.padding.horizontal")
            .unwrap(),
        "50px 100px"
    );
}

#[test]
fn function_arguments_are_plain_text() {
    let vars = vars(serde_json::json!({
        "colors": { "top": "white", "bottom": "black" }
    }));
    assert_eq!(
        vars.rewrite("linear-gradient(top, $global.colors.top, $global.colors.bottom)")
            .unwrap(),
        "linear-gradient(top, white, black)"
    );
}

#[test]
fn at_rule_preludes_are_plain_text() {
    let vars = vars(serde_json::json!({
        "screen": { "notebook": "1400px", "tablet": "1100px" }
    }));
    assert_eq!(
        vars.rewrite("($global.screen.tablet >= width < $global.screen.notebook)")
            .unwrap(),
        "(1100px >= width < 1400px)"
    );
}

#[test]
fn internal_references() {
    let vars = vars(serde_json::json!({
        "colors": { "main": "red", "lighter": "color($global.colors.main l(+30%))" }
    }));
    assert_eq!(vars.rewrite("$global.colors.main").unwrap(), "red");
    assert_eq!(
        vars.rewrite("$global.colors.lighter").unwrap(),
        "color(red l(+30%))"
    );
}

// ============================================================================
// Internal reference hardening
// ============================================================================

#[test]
fn circular_internal_references_fail_to_build() {
    let err = GlobalVars::with_data(table(serde_json::json!({
        "a": "$global.b",
        "b": "$global.a"
    })))
    .unwrap_err();

    match err {
        GlobalVarsError::Resolve(ResolveError::CircularReference { chain }) => {
            assert_eq!(chain, ["a", "b", "a"]);
        }
        other => panic!("expected circular reference, got {other:?}"),
    }
}

#[test]
fn forward_references_resolve_regardless_of_order() {
    let vars = vars(serde_json::json!({
        "a": "x $global.z",
        "z": "$global.m",
        "m": "1"
    }));
    assert_eq!(vars.rewrite("$global.a").unwrap(), "x 1");
}

#[test]
fn caller_data_is_not_modified() {
    let data = table(serde_json::json!({
        "colors": { "main": "red", "lighter": "tint($global.colors.main)" }
    }));
    let vars = GlobalVars::with_data(data.clone()).unwrap();

    let lighter = &data["colors"].as_branch().unwrap()["lighter"];
    assert_eq!(lighter, &VarNode::from("tint($global.colors.main)"));
    assert_eq!(vars.store().get("colors.lighter").unwrap(), "tint(red)");
}
