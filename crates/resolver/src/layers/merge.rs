//! Layer loading and merging.

use propstack_format::{PropertyMap, parse};
use tracing::{debug, warn};

use super::candidates::candidate_file_names;
use crate::config::LayerConfig;
use crate::constants::MASKED_VALUE;
use crate::error::ResolveError;
use crate::resource::{Resource, ResourceLoader};

/// Merge `overlay` on top of `base` into a new map.
///
/// Every key of `overlay` that is absent from `base` is a consistency
/// violation: fatal under strict merging, a logged warning otherwise. The
/// overlay always wins on key collisions.
pub fn merge_layer(
    base: &PropertyMap,
    overlay: &PropertyMap,
    strict: bool,
) -> Result<PropertyMap, ResolveError> {
    for (key, _) in overlay.iter() {
        if !base.contains_key(key) {
            warn!(
                key,
                "overriding property does not exist in original properties"
            );
            if strict {
                return Err(ResolveError::NoMatchingProperty {
                    key: key.to_string(),
                });
            }
        }
    }

    let mut merged = base.clone();
    for (key, value) in overlay.iter() {
        merged.insert(key, value);
    }
    Ok(merged)
}

/// Produce the fully merged, still-unresolved property map for `config`.
///
/// The mandatory default file is loaded from the primary source, each
/// available candidate override is merged in recipe order, and, when an
/// operational-override source is configured, the same default-then-candidate
/// sequence runs against it on top of the primary result.
pub fn resolve_layers(config: LayerConfig) -> Result<PropertyMap, ResolveError> {
    let default_name = config.default_file_name();
    let candidates = candidate_file_names(
        &config.switch_recipes,
        config.variables.as_ref(),
        config.switch_delimiter,
        &config.override_dir,
        config.extension_separator,
        &config.extension,
    );
    debug!(?candidates, "computed candidate override files");

    let mut merged = match config.primary.open(&default_name) {
        Some(resource) => load_layer(resource.as_ref(), &config)?,
        None => {
            warn!(
                file = %default_name,
                base = config.primary.base_location(),
                "unable to source default properties file"
            );
            if config.strict {
                return Err(ResolveError::NoDefaultPropertiesFile { name: default_name });
            }
            PropertyMap::new()
        }
    };

    merged = merge_candidates(merged, &candidates, config.primary.as_ref(), &config)?;

    if let Some(overrides) = config.operational_overrides.as_ref() {
        let mut names = Vec::with_capacity(candidates.len() + 1);
        names.push(default_name);
        names.extend(candidates.iter().cloned());
        merged = merge_candidates(merged, &names, overrides.as_ref(), &config)?;
    }

    Ok(merged)
}

/// Merge each of `names` that `loader` can open, in order, on top of `base`.
/// Absent files are the expected common case and are skipped silently.
fn merge_candidates(
    base: PropertyMap,
    names: &[String],
    loader: &dyn ResourceLoader,
    config: &LayerConfig,
) -> Result<PropertyMap, ResolveError> {
    let mut merged = base;
    for name in names {
        if let Some(resource) = loader.open(name) {
            let overlay = load_layer(resource.as_ref(), config)?;
            merged = merge_layer(&merged, &overlay, config.strict)?;
        }
    }
    Ok(merged)
}

/// Load one available resource as a property map.
///
/// An I/O failure is downgraded to an empty layer with a warning; text that
/// is not valid properties format is fatal.
fn load_layer(resource: &dyn Resource, config: &LayerConfig) -> Result<PropertyMap, ResolveError> {
    debug!(resource = %resource, "loading properties");
    let bytes = match resource.read() {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(resource = %resource, %error, "unable to read resource, treating as empty");
            return Ok(PropertyMap::new());
        }
    };

    let map = parse(&bytes).map_err(|source| ResolveError::InvalidProperties {
        name: resource.to_string(),
        source,
    })?;

    if config.dump_properties_at_debug && tracing::enabled!(tracing::Level::DEBUG) {
        for (key, value) in map.iter() {
            if config.sensitive_mask.is_match(key) {
                debug!("{key} : {MASKED_VALUE}");
            } else {
                debug!("{key} : {value}");
            }
        }
    }

    Ok(map)
}
