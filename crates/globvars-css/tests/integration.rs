//! Stylesheet-in, stylesheet-out tests.

use globvars::{GlobalVars, Options, Table};
use globvars_css::{process_css, CssError};

fn data(yaml: &str) -> Table {
    serde_yaml::from_str(yaml).unwrap()
}

fn check(yaml: &str, input: &str, output: &str) {
    check_options(Options::new(data(yaml)), input, output);
}

fn check_options(options: Options, input: &str, output: &str) {
    let vars = GlobalVars::new(options).unwrap();
    assert_eq!(process_css(input, &vars).unwrap(), output);
}

fn check_error(yaml: &str, input: &str, message: &str) {
    let vars = GlobalVars::with_data(data(yaml)).unwrap();
    let err = process_css(input, &vars).unwrap_err();
    assert!(
        err.to_string().contains(message),
        "{err} does not contain {message}"
    );
}

// ============================================================================
// Plain properties
// ============================================================================

#[test]
fn does_not_change_other_variables() {
    check("color: red", "a {color: $color}", "a {color: $color}");
}

#[test]
fn injects_global_variables() {
    check("color: red", "a {color: $global.color}", "a {color: red}");
}

#[test]
fn unknown_global_variable() {
    check_error(
        "{}",
        "a {color: $global.color}",
        "Property \"color\" is not defined.",
    );
}

#[test]
fn custom_prefix() {
    check_options(
        Options::new(data("color: red")).with_prefix("--const-"),
        "a {color: --const-color}",
        "a {color: red}",
    );
}

// ============================================================================
// Nested properties
// ============================================================================

#[test]
fn injects_nested_variables() {
    check(
        "colors:\n  primary: red\n",
        "a {color: $global.colors.primary}",
        "a {color: red}",
    );
}

#[test]
fn unknown_nested_variable() {
    check_error(
        "colors:\n  primary: red\n",
        "a {color: $global.colors.secondary}",
        "Property \"colors.secondary\" is not defined.",
    );
}

#[test]
fn number_value() {
    check(
        "aspect-ratios:\n  video-height: 0.5625\n",
        "div {padding-top: calc($global.aspect-ratios.video-height * 1%)}",
        "div {padding-top: calc(0.5625 * 1%)}",
    );
}

#[test]
fn table_value() {
    check_error(
        "colors:\n  primary: red\n",
        "a {color: $global.colors}",
        "The \"colors\" property has an inappropriate type.",
    );
}

#[test]
fn custom_prefix_nested() {
    check_options(
        Options::new(data("colors:\n  primary: red\n")).with_prefix("--const-"),
        "a {color: --const-colors.primary}",
        "a {color: red}",
    );
}

#[test]
fn several_properties_per_declaration() {
    check(
        "padding:\n  vertical: 50px\n  horizontal: 100px\n",
        "div {padding: $global.padding.vertical $global.padding.horizontal}",
        "div {padding: 50px 100px}",
    );
}

#[test]
fn commas_in_declaration() {
    check(
        "colors:\n  top: white\n  bottom: black\n",
        "div {background: linear-gradient(top, $global.colors.top, $global.colors.bottom)}",
        "div {background: linear-gradient(top, white, black)}",
    );
}

#[test]
fn at_rules() {
    check(
        "screen:\n  notebook: 1400px\n  tablet: 1100px\n",
        "@media ($global.screen.tablet >= width < $global.screen.notebook){div {color: red}}",
        "@media (1100px >= width < 1400px){div {color: red}}",
    );
}

#[test]
fn internal_references() {
    check(
        "colors:\n  main: red\n  lighter: color($global.colors.main l(+30%))\n",
        ".test {color: $global.colors.main; background: $global.colors.lighter;}",
        ".test {color: red; background: color(red l(+30%));}",
    );
}

// ============================================================================
// Stylesheet structure
// ============================================================================

#[test]
fn values_inside_media_blocks_and_nesting() {
    check(
        "gap: 8px\nhover: blue\n",
        "@media (min-width: 10px) {\n  .a { margin: $global.gap; &:hover { color: $global.hover; } }\n}\n",
        "@media (min-width: 10px) {\n  .a { margin: 8px; &:hover { color: blue; } }\n}\n",
    );
}

#[test]
fn custom_properties_and_important() {
    check(
        "brand: '#f60'\n",
        ":root { --brand: $global.brand; } a { color: $global.brand !important }",
        ":root { --brand: #f60; } a { color: #f60 !important }",
    );
}

#[test]
fn selectors_and_comments_are_preserved() {
    check(
        "color: red\n",
        "/* uses $global.color */\n.x > .y, .z { color: $global.color; }\n",
        "/* uses $global.color */\n.x > .y, .z { color: red; }\n",
    );
}

#[test]
fn comments_inside_values_are_not_resolved() {
    check(
        "color: red\n",
        "a { color: red /* was $global.old */ }\nb { margin: calc(1px /* $global.x */ + 2px) }",
        "a { color: red /* was $global.old */ }\nb { margin: calc(1px /* $global.x */ + 2px) }",
    );
    check(
        "gap: 4px\n",
        "@media /* $global.none */ (min-width: $global.gap) { a { b: c } }",
        "@media /* $global.none */ (min-width: 4px) { a { b: c } }",
    );
}

#[test]
fn first_error_aborts_processing() {
    let vars = GlobalVars::with_data(data("color: red")).unwrap();
    let err = process_css(
        "a { color: $global.color }\nb { color: $global.missing }\nc { color: $global.other }",
        &vars,
    )
    .unwrap_err();

    let CssError::Variable {
        plugin,
        line,
        column,
        source,
        ..
    } = err;
    assert_eq!(plugin, "global-vars");
    assert_eq!((line, column), (2, 12));
    assert_eq!(source.path(), "missing");
}
