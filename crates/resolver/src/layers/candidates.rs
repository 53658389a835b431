//! Candidate override file name computation.

use crate::vars::VariableSource;

/// Compute the ordered list of candidate override file names.
///
/// Each recipe is walked in order: every variable name is resolved against
/// the system-property-like namespace first, then the environment-like one.
/// A variable that resolves to nothing (or to whitespace) abandons the whole
/// recipe. Fully resolved recipes contribute
/// `{relative_prefix}{values joined by delimiter}{separator}{extension}`,
/// and the returned order (recipe order) is the override precedence.
pub fn candidate_file_names(
    recipes: &[Vec<String>],
    variables: &dyn VariableSource,
    delimiter: char,
    relative_prefix: &str,
    extension_separator: char,
    extension: &str,
) -> Vec<String> {
    let prefix = if relative_prefix.trim().is_empty() {
        ""
    } else {
        relative_prefix
    };

    recipes
        .iter()
        .filter_map(|recipe| resolve_recipe(recipe, variables, delimiter))
        .map(|stem| format!("{prefix}{stem}{extension_separator}{extension}"))
        .collect()
}

/// Resolve one recipe to a file stem, or `None` when any variable is unset.
fn resolve_recipe(
    recipe: &[String],
    variables: &dyn VariableSource,
    delimiter: char,
) -> Option<String> {
    if recipe.is_empty() {
        return None;
    }

    let mut values = Vec::with_capacity(recipe.len());
    for name in recipe {
        let value = variables
            .system_var(name)
            .or_else(|| variables.env_var(name))
            .unwrap_or_default();
        if value.trim().is_empty() {
            return None;
        }
        values.push(value);
    }
    Some(values.join(&delimiter.to_string()))
}
