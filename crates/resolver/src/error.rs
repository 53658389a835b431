//! Error types for layered properties resolution.
//!
//! Responsibilities:
//! - Define the fatal conditions that abort a resolution pass, carrying the
//!   offending key, file, or placeholder.
//!
//! Does NOT handle:
//! - Recoverable conditions (missing optional override files, unreadable
//!   resources, lenient merge mismatches); those are logged and resolution
//!   continues.
//!
//! Invariants:
//! - A failed resolution yields no partial configuration; callers treat every
//!   pass as all-or-nothing.

use propstack_format::PropertiesError;
use thiserror::Error;

/// Fatal conditions raised while resolving layered properties.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The mandatory default properties file was absent under strict merging.
    #[error("unable to source default properties file: {name}")]
    NoDefaultPropertiesFile { name: String },

    /// Strict merging found an overriding key that does not exist in the
    /// properties being overridden.
    #[error("property \"{key}\" from overriding properties does not exist in original properties")]
    NoMatchingProperty { key: String },

    /// An available resource held text that is not valid properties format.
    #[error("invalid properties text in {name}")]
    InvalidProperties {
        name: String,
        #[source]
        source: PropertiesError,
    },

    /// A placeholder directly or indirectly referenced itself.
    #[error("circular placeholder reference '{placeholder}' in property definitions")]
    CircularReference { placeholder: String },

    /// A placeholder could not be resolved and unresolvable placeholders are
    /// not being ignored.
    #[error("could not resolve placeholder '{placeholder}'")]
    UnresolvablePlaceholder { placeholder: String },
}
