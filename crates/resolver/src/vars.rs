//! Variable sources: the two external namespaces consulted during
//! resolution.
//!
//! Responsibilities:
//! - Define the `VariableSource` contract: best-effort lookups against a
//!   system-property-like namespace and an environment-variable-like
//!   namespace, plus whole-namespace snapshots for the placeholder engine.
//! - Provide the process-backed implementation and an in-memory one.
//!
//! Does NOT handle:
//! - Deciding which namespace wins; callers encode precedence (candidate
//!   computation prefers system over environment, and so does the
//!   placeholder engine).
//!
//! Invariants:
//! - The `*_or` lookups are total: a missing variable yields the supplied
//!   default, never an error.
//! - Implementations hold no mutable state; snapshots are fresh copies.

use propstack_format::PropertyMap;

/// Best-effort lookup against the two external variable namespaces.
pub trait VariableSource {
    /// Look up `name` in the system-property-like namespace.
    fn system_var(&self, name: &str) -> Option<String>;

    /// Look up `name` in the environment-variable-like namespace.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Total system-namespace lookup: missing yields `default`.
    fn system_var_or(&self, name: &str, default: &str) -> String {
        self.system_var(name)
            .unwrap_or_else(|| default.to_string())
    }

    /// Total environment-namespace lookup: missing yields `default`.
    fn env_var_or(&self, name: &str, default: &str) -> String {
        self.env_var(name).unwrap_or_else(|| default.to_string())
    }

    /// A copy of the entire system-property-like namespace.
    fn system_snapshot(&self) -> PropertyMap;

    /// A copy of the entire environment-variable-like namespace.
    fn env_snapshot(&self) -> PropertyMap;
}

/// Variables of the running process.
///
/// The environment-like namespace is the process environment. The
/// system-property-like namespace has no direct platform equivalent, so it is
/// an explicit override map supplied by the embedding application (empty by
/// default); it still takes precedence over the environment wherever both
/// namespaces are consulted.
#[derive(Default)]
pub struct PlatformVariables {
    system_overrides: PropertyMap,
}

impl PlatformVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `overrides` as the system-property-like namespace.
    pub fn with_system_overrides(overrides: PropertyMap) -> Self {
        Self {
            system_overrides: overrides,
        }
    }
}

impl VariableSource for PlatformVariables {
    fn system_var(&self, name: &str) -> Option<String> {
        self.system_overrides.get(name).map(str::to_string)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn system_snapshot(&self) -> PropertyMap {
        self.system_overrides.clone()
    }

    fn env_snapshot(&self) -> PropertyMap {
        std::env::vars().collect()
    }
}

/// Fixed in-memory namespaces, for tests and for embedders that manage their
/// own variables.
#[derive(Default)]
pub struct MapVariables {
    system: PropertyMap,
    env: PropertyMap,
}

impl MapVariables {
    pub fn new(system: PropertyMap, env: PropertyMap) -> Self {
        Self { system, env }
    }

    /// Only an environment-like namespace; the system namespace is empty.
    pub fn env_only(env: PropertyMap) -> Self {
        Self {
            system: PropertyMap::new(),
            env,
        }
    }
}

impl VariableSource for MapVariables {
    fn system_var(&self, name: &str) -> Option<String> {
        self.system.get(name).map(str::to_string)
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).map(str::to_string)
    }

    fn system_snapshot(&self) -> PropertyMap {
        self.system.clone()
    }

    fn env_snapshot(&self) -> PropertyMap {
        self.env.clone()
    }
}
