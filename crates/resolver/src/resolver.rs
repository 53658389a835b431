//! The combined front door: merged layers plus placeholder resolution.
//!
//! Responsibilities:
//! - Run the layer resolution pass once at construction and keep the merged,
//!   unresolved map.
//! - Serve resolved values (whole map or per key) through the placeholder
//!   engine, and raw values for callers that want them untouched.
//!
//! Does NOT handle:
//! - Re-reading resources after construction; build a new resolver for a
//!   fresh pass.
//!
//! Invariants:
//! - A constructed resolver is immutable and safe to share across threads.

use propstack_format::PropertyMap;

use crate::config::{LayerConfig, PlaceholderConfig};
use crate::error::ResolveError;
use crate::layers::resolve_layers;
use crate::placeholder::PlaceholderResolver;

/// Resolves an application's properties: layered merge first, placeholders
/// on demand.
pub struct PropertiesResolver {
    unresolved: PropertyMap,
    placeholders: PlaceholderResolver,
    trim_values: bool,
}

impl PropertiesResolver {
    /// Merge the layers described by `layers` and prepare the placeholder
    /// engine described by `placeholders`.
    pub fn new(
        layers: LayerConfig,
        placeholders: PlaceholderConfig,
    ) -> Result<Self, ResolveError> {
        let trim_values = placeholders.trim_values;
        Ok(Self {
            unresolved: resolve_layers(layers)?,
            placeholders: PlaceholderResolver::new(placeholders),
            trim_values,
        })
    }

    /// The fully resolved property map.
    pub fn properties(&self) -> Result<PropertyMap, ResolveError> {
        self.placeholders.resolve_map(&self.unresolved)
    }

    /// The resolved value of one property, or `None` when the key is absent.
    pub fn property(&self, key: &str) -> Result<Option<String>, ResolveError> {
        self.placeholders.resolve_value(&self.unresolved, key)
    }

    /// The raw value of one property, placeholders untouched (trimmed when
    /// trimming is enabled).
    pub fn unresolved_property(&self, key: &str) -> Option<String> {
        self.unresolved.get(key).map(|value| {
            if self.trim_values {
                value.trim().to_string()
            } else {
                value.to_string()
            }
        })
    }

    /// The merged map with placeholders untouched.
    pub fn unresolved_properties(&self) -> PropertyMap {
        self.unresolved.clone()
    }
}
