//! Centralized defaults for the propstack resolver.
//!
//! This module contains the default values used by `LayerConfig` and
//! `PlaceholderConfig` so they are defined once and visible in one place.

// =============================================================================
// Layer Resolution Defaults
// =============================================================================

/// Default stem of the mandatory default properties file (no extension).
pub const DEFAULT_FILE_STEM: &str = "default";

/// Default extension of properties files (no separator).
pub const DEFAULT_PROPERTIES_EXTENSION: &str = "properties";

/// Default separator between a file stem and its extension.
pub const DEFAULT_EXTENSION_SEPARATOR: char = '.';

/// Default delimiter joining switch-variable values into one file name
/// (e.g. `dev.x86_64.properties`).
pub const DEFAULT_SWITCH_DELIMITER: char = '.';

/// Default variable name used to select override files.
pub const DEFAULT_SWITCH_VARIABLE: &str = "ENV";

/// Default directory, relative to a resource loader's base location, holding
/// the override files that are selected by switch variables.
pub const DEFAULT_OVERRIDE_DIR: &str = "environments/";

/// Strict merging is the default: every overriding key must already exist.
pub const DEFAULT_STRICT_MERGING: bool = true;

// =============================================================================
// Sensitive-Value Masking
// =============================================================================

/// Default pattern for property keys whose values must not reach the logs.
pub const DEFAULT_SENSITIVE_MASK: &str = "(?i).*pass.*|.*secret.*";

/// Replacement text logged in place of a masked value.
pub const MASKED_VALUE: &str = "######";

// =============================================================================
// Placeholder Defaults
// =============================================================================

/// Default placeholder prefix.
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "${";

/// Default placeholder suffix.
pub const DEFAULT_PLACEHOLDER_SUFFIX: &str = "}";

/// Default separator between a placeholder key and its fallback literal.
pub const DEFAULT_VALUE_SEPARATOR: &str = ":";

// =============================================================================
// Resource Location Prefixes
// =============================================================================

/// Location prefix selecting the bundled (in-memory) resource loader.
pub const BUNDLE_LOCATION_PREFIX: &str = "classpath:";

/// Location prefix selecting the filesystem resource loader.
pub const FILESYSTEM_LOCATION_PREFIX: &str = "filesystem:";
