//! Configuration structs for the two resolution passes.
//!
//! Responsibilities:
//! - Carry every knob of the layer resolver (`LayerConfig`) and of the
//!   placeholder engine (`PlaceholderConfig`) as plain public fields with
//!   sensible defaults.
//!
//! Does NOT handle:
//! - The resolution algorithms themselves (see `layers` and `placeholder`).
//!
//! Invariants:
//! - Configs are consumed by value; a resolution pass sees one immutable
//!   configuration from start to finish.

use regex::Regex;

use crate::constants::{
    DEFAULT_EXTENSION_SEPARATOR, DEFAULT_FILE_STEM, DEFAULT_OVERRIDE_DIR,
    DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_PLACEHOLDER_SUFFIX, DEFAULT_PROPERTIES_EXTENSION,
    DEFAULT_SENSITIVE_MASK, DEFAULT_STRICT_MERGING, DEFAULT_SWITCH_DELIMITER,
    DEFAULT_SWITCH_VARIABLE, DEFAULT_VALUE_SEPARATOR,
};
use crate::resource::ResourceLoader;
use crate::vars::{PlatformVariables, VariableSource};

/// Configuration of the layer resolver.
pub struct LayerConfig {
    /// Source of the default properties file and its override candidates.
    pub primary: Box<dyn ResourceLoader>,

    /// Optional second source, merged as a full default-plus-candidates pass
    /// on top of the primary result. This is the hook for overrides an
    /// operations team maintains outside the application artifact.
    pub operational_overrides: Option<Box<dyn ResourceLoader>>,

    /// The variables consulted when computing candidate override file names.
    pub variables: Box<dyn VariableSource>,

    /// Recipes of variable names; each fully resolved recipe yields one
    /// candidate override file, and recipe order is override precedence.
    pub switch_recipes: Vec<Vec<String>>,

    /// Delimiter joining resolved recipe values into one file stem.
    pub switch_delimiter: char,

    /// Directory, relative to each loader's base location, holding the
    /// candidate override files.
    pub override_dir: String,

    /// Stem of the mandatory default properties file.
    pub default_file_stem: String,

    /// Properties file extension, without the separator.
    pub extension: String,

    /// Separator between file stem and extension.
    pub extension_separator: char,

    /// Strict merging: every overriding key must already exist in the
    /// properties being overridden, and the default file must exist.
    pub strict: bool,

    /// Keys matching this pattern have their values masked in the debug dump.
    pub sensitive_mask: Regex,

    /// Whether loaded layers are dumped at debug level at all.
    pub dump_properties_at_debug: bool,
}

impl LayerConfig {
    /// A config with the documented defaults, reading from `primary`.
    pub fn new(primary: Box<dyn ResourceLoader>) -> Self {
        Self {
            primary,
            operational_overrides: None,
            variables: Box::new(PlatformVariables::new()),
            switch_recipes: vec![vec![DEFAULT_SWITCH_VARIABLE.to_string()]],
            switch_delimiter: DEFAULT_SWITCH_DELIMITER,
            override_dir: DEFAULT_OVERRIDE_DIR.to_string(),
            default_file_stem: DEFAULT_FILE_STEM.to_string(),
            extension: DEFAULT_PROPERTIES_EXTENSION.to_string(),
            extension_separator: DEFAULT_EXTENSION_SEPARATOR,
            strict: DEFAULT_STRICT_MERGING,
            sensitive_mask: Regex::new(DEFAULT_SENSITIVE_MASK)
                .expect("default sensitive mask is a valid pattern"),
            dump_properties_at_debug: true,
        }
    }

    /// Full name of the default properties file, e.g. `default.properties`.
    pub fn default_file_name(&self) -> String {
        format!(
            "{}{}{}",
            self.default_file_stem, self.extension_separator, self.extension
        )
    }
}

/// Configuration of the placeholder engine.
pub struct PlaceholderConfig {
    /// Placeholder opening marker.
    pub prefix: String,

    /// Placeholder closing marker.
    pub suffix: String,

    /// Separator splitting a placeholder body into key and fallback literal;
    /// `None` disables fallback syntax entirely.
    pub value_separator: Option<String>,

    /// Leave unresolvable placeholders verbatim instead of failing.
    pub ignore_unresolvable: bool,

    /// Trim leading/trailing whitespace from every resolved value.
    pub trim_values: bool,

    /// Consult the system-property-like namespace for unknown keys.
    pub resolve_system: bool,

    /// Consult the environment-variable-like namespace for unknown keys.
    pub resolve_environment: bool,

    /// The namespaces themselves, snapshotted when an engine is built.
    pub variables: Box<dyn VariableSource>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            suffix: DEFAULT_PLACEHOLDER_SUFFIX.to_string(),
            value_separator: Some(DEFAULT_VALUE_SEPARATOR.to_string()),
            ignore_unresolvable: true,
            trim_values: true,
            resolve_system: true,
            resolve_environment: true,
            variables: Box::new(PlatformVariables::new()),
        }
    }
}
