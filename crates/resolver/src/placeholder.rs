//! The placeholder engine: recursive `${...}` resolution inside values.
//!
//! Responsibilities:
//! - Scan each value for placeholders, balancing nested brackets, and replace
//!   every reference with its resolved text.
//! - Resolve keys against the supplied map first, then the environment-like
//!   and system-like namespaces (system wins), then the `key:default`
//!   fallback literal.
//! - Detect circular references via a per-value visited set.
//!
//! Does NOT handle:
//! - Layer merging (see `layers`); the engine never touches keys, only
//!   values.
//!
//! Invariants:
//! - The scan is an explicit position/nesting-depth state machine, never a
//!   regex, so arbitrary nesting depth and custom prefix/suffix strings work.
//! - A circular reference is fatal even when unresolvable placeholders are
//!   being ignored.
//! - Namespaces are snapshotted at engine construction; one resolution pass
//!   sees a stable view.

use std::collections::HashSet;

use propstack_format::PropertyMap;
use tracing::trace;

use crate::config::PlaceholderConfig;
use crate::error::ResolveError;

/// Bracket pairs whose open form, when it ends the configured prefix, counts
/// toward nesting depth on its own (so `${outer${inner}}` balances).
const SIMPLE_PREFIXES: [(&str, &str); 3] = [("}", "{"), ("]", "["), (")", "(")];

/// Resolves placeholders inside property values.
///
/// Built once per configuration; each `resolve_*` call is an independent
/// pass over immutable state, so a resolver may be shared across threads.
pub struct PlaceholderResolver {
    prefix: String,
    suffix: String,
    simple_prefix: String,
    value_separator: Option<String>,
    ignore_unresolvable: bool,
    trim_values: bool,
    environment: Option<PropertyMap>,
    system: Option<PropertyMap>,
}

impl PlaceholderResolver {
    pub fn new(config: PlaceholderConfig) -> Self {
        let environment = config
            .resolve_environment
            .then(|| config.variables.env_snapshot());
        let system = config
            .resolve_system
            .then(|| config.variables.system_snapshot());
        let simple_prefix = simple_prefix_for(&config.prefix, &config.suffix);

        Self {
            prefix: config.prefix,
            suffix: config.suffix,
            simple_prefix,
            value_separator: config.value_separator,
            ignore_unresolvable: config.ignore_unresolvable,
            trim_values: config.trim_values,
            environment,
            system,
        }
    }

    /// Resolve every value of `map`, using the map itself as the base
    /// namespace, into a new map. Keys are untouched.
    pub fn resolve_map(&self, map: &PropertyMap) -> Result<PropertyMap, ResolveError> {
        map.iter()
            .map(|(key, value)| {
                let mut visited = HashSet::new();
                Ok((
                    key.to_string(),
                    self.parse_value(value, map, &mut visited)?,
                ))
            })
            .collect()
    }

    /// Resolve the value stored under `key`, or `None` when the key is
    /// absent from `map`.
    pub fn resolve_value(
        &self,
        map: &PropertyMap,
        key: &str,
    ) -> Result<Option<String>, ResolveError> {
        match map.get(key) {
            None => Ok(None),
            Some(value) => {
                let mut visited = HashSet::new();
                self.parse_value(value, map, &mut visited).map(Some)
            }
        }
    }

    fn parse_value(
        &self,
        value: &str,
        map: &PropertyMap,
        visited: &mut HashSet<String>,
    ) -> Result<String, ResolveError> {
        // Quick check: most values hold no placeholders at all.
        let Some(first) = value.find(&self.prefix) else {
            return Ok(self.trimmed(value));
        };

        let mut buf = String::from(value);
        let mut start_index = Some(first);

        while let Some(start) = start_index {
            let Some(end) = self.find_placeholder_end(&buf, start) else {
                // No matching suffix: the rest of the value stays untouched.
                break;
            };

            let body = buf[start + self.prefix.len()..end].to_string();
            if !visited.insert(body.clone()) {
                return Err(ResolveError::CircularReference { placeholder: body });
            }

            // The key may itself be templated; resolve it first.
            let key = self.parse_value(&body, map, visited)?;

            let mut resolved = self.lookup(map, &key);
            if resolved.is_none()
                && let Some(separator) = &self.value_separator
                && let Some(separator_index) = key.find(separator.as_str())
            {
                let actual_key = &key[..separator_index];
                let default_literal = &key[separator_index + separator.len()..];
                resolved = Some(
                    self.lookup(map, actual_key)
                        .unwrap_or_else(|| default_literal.to_string()),
                );
            }

            match resolved {
                Some(found) => {
                    // The resolved text may contain further placeholders.
                    let substituted = self.parse_value(&found, map, visited)?;
                    buf.replace_range(start..end + self.suffix.len(), &substituted);
                    trace!(placeholder = %key, "resolved placeholder");
                    start_index = find_from(&buf, &self.prefix, start + substituted.len());
                }
                None if self.ignore_unresolvable => {
                    start_index = find_from(&buf, &self.prefix, end + self.suffix.len());
                }
                None => {
                    return Err(ResolveError::UnresolvablePlaceholder { placeholder: key });
                }
            }

            visited.remove(&body);
        }

        if self.trim_values {
            buf = buf.trim().to_string();
        }
        Ok(buf)
    }

    fn trimmed(&self, text: &str) -> String {
        if self.trim_values {
            text.trim().to_string()
        } else {
            text.to_string()
        }
    }

    /// Look `key` up in the map, then in the enabled namespaces. Both
    /// namespaces are consulted; the system-like one wins over the
    /// environment-like one.
    fn lookup(&self, map: &PropertyMap, key: &str) -> Option<String> {
        let mut value = map.get(key).map(str::to_string);
        if value.is_none() {
            if let Some(environment) = &self.environment {
                value = environment.get(key).map(str::to_string);
            }
            if let Some(system) = &self.system
                && let Some(found) = system.get(key)
            {
                value = Some(found.to_string());
            }
        }
        value
    }

    /// Find the suffix matching the prefix at `start`, balancing any nested
    /// simple-prefix brackets in between.
    fn find_placeholder_end(&self, buf: &str, start: usize) -> Option<usize> {
        let mut index = start + self.prefix.len();
        let mut within_nested = 0usize;

        while index < buf.len() {
            if buf[index..].starts_with(&self.suffix) {
                if within_nested > 0 {
                    within_nested -= 1;
                    index += self.suffix.len();
                } else {
                    return Some(index);
                }
            } else if buf[index..].starts_with(&self.simple_prefix) {
                within_nested += 1;
                index += self.simple_prefix.len();
            } else {
                index += buf[index..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
            }
        }
        None
    }
}

/// Resolve every value of `map` under `config`, in one call.
pub fn resolve_placeholders(
    map: &PropertyMap,
    config: PlaceholderConfig,
) -> Result<PropertyMap, ResolveError> {
    PlaceholderResolver::new(config).resolve_map(map)
}

/// The bracket that counts toward nesting: the open form paired with the
/// suffix when the prefix ends with it, otherwise the full prefix.
fn simple_prefix_for(prefix: &str, suffix: &str) -> String {
    for (close, open) in SIMPLE_PREFIXES {
        if suffix == close && prefix.ends_with(open) {
            return open.to_string();
        }
    }
    prefix.to_string()
}

fn find_from(buf: &str, needle: &str, from: usize) -> Option<usize> {
    buf.get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|i| i + from)
}
