//! Layered, environment-switched properties resolution for propstack.
//!
//! This crate turns a set of layered properties resources into one resolved
//! configuration map in two passes: the layer resolver merges a default
//! properties file with override files selected by environment/system
//! variables, and the placeholder engine then resolves `${...}` references
//! inside the merged values.

mod config;
pub mod constants;
mod error;
mod layers;
mod placeholder;
mod resolver;
mod resource;
mod vars;

pub use config::{LayerConfig, PlaceholderConfig};
pub use error::ResolveError;
pub use layers::{candidate_file_names, merge_layer, resolve_layers};
pub use placeholder::{PlaceholderResolver, resolve_placeholders};
pub use resolver::PropertiesResolver;
pub use resource::{
    Bundle, BundledResources, FileSystemResources, Resource, ResourceLoader, loader_for_location,
};
pub use vars::{MapVariables, PlatformVariables, VariableSource};

pub use propstack_format::PropertyMap;
