//! Tests for candidate override file name computation.
//!
//! Responsibilities:
//! - Verify recipe-order preservation, delimiter joining, and the
//!   abandon-on-empty rule.
//! - Verify system-namespace precedence over the environment namespace.

use crate::layers::candidate_file_names;
use crate::vars::MapVariables;

fn recipes(recipes: &[&[&str]]) -> Vec<Vec<String>> {
    recipes
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_recipe_order_is_candidate_order() {
    let vars = MapVariables::env_only(
        [("ENV", "dev"), ("ARCH", "x64")].into_iter().collect(),
    );
    let names = candidate_file_names(
        &recipes(&[&["ENV"], &["ENV", "ARCH"]]),
        &vars,
        '.',
        "",
        '.',
        "properties",
    );
    assert_eq!(names, vec!["dev.properties", "dev.x64.properties"]);
}

#[test]
fn test_unset_variable_abandons_its_recipe_only() {
    let vars = MapVariables::env_only([("ENV", "dev")].into_iter().collect());
    let names = candidate_file_names(
        &recipes(&[&["ENV"], &["ENV", "ARCH"]]),
        &vars,
        '.',
        "",
        '.',
        "properties",
    );
    assert_eq!(names, vec!["dev.properties"]);
}

#[test]
fn test_whitespace_resolution_counts_as_unset() {
    let vars = MapVariables::env_only(
        [("ENV", "dev"), ("ARCH", "   ")].into_iter().collect(),
    );
    let names = candidate_file_names(
        &recipes(&[&["ENV", "ARCH"]]),
        &vars,
        '.',
        "",
        '.',
        "properties",
    );
    assert!(names.is_empty());
}

#[test]
fn test_system_namespace_wins_over_environment() {
    let vars = MapVariables::new(
        [("ENV", "prod")].into_iter().collect(),
        [("ENV", "dev")].into_iter().collect(),
    );
    let names = candidate_file_names(
        &recipes(&[&["ENV"]]),
        &vars,
        '.',
        "",
        '.',
        "properties",
    );
    assert_eq!(names, vec!["prod.properties"]);
}

#[test]
fn test_empty_system_value_does_not_fall_back_to_environment() {
    // A system variable explicitly set to nothing abandons the recipe even
    // when the environment has a value.
    let vars = MapVariables::new(
        [("ENV", "")].into_iter().collect(),
        [("ENV", "dev")].into_iter().collect(),
    );
    let names = candidate_file_names(
        &recipes(&[&["ENV"]]),
        &vars,
        '.',
        "",
        '.',
        "properties",
    );
    assert!(names.is_empty());
}

#[test]
fn test_relative_prefix_and_custom_delimiter() {
    let vars = MapVariables::env_only(
        [("ENV", "dev"), ("REGION", "eu")].into_iter().collect(),
    );
    let names = candidate_file_names(
        &recipes(&[&["ENV", "REGION"]]),
        &vars,
        '-',
        "environments/",
        '.',
        "props",
    );
    assert_eq!(names, vec!["environments/dev-eu.props"]);
}

#[test]
fn test_blank_prefix_and_empty_recipe_contribute_nothing() {
    let vars = MapVariables::env_only([("ENV", "dev")].into_iter().collect());
    let names = candidate_file_names(
        &recipes(&[&[], &["ENV"]]),
        &vars,
        '.',
        "   ",
        '.',
        "properties",
    );
    assert_eq!(names, vec!["dev.properties"]);
}
