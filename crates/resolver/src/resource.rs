//! Resource abstraction and the two concrete loaders.
//!
//! Responsibilities:
//! - Define the `Resource`/`ResourceLoader` contracts the layer resolver
//!   consumes: open-or-absent by name, then a blocking byte read.
//! - Provide the filesystem-backed loader and the bundled (in-memory) loader,
//!   plus the `classpath:`/`filesystem:` prefix factory.
//!
//! Does NOT handle:
//! - Parsing properties text (propstack-format).
//! - Caching: every `open` hits the backing store so a fresh resolution pass
//!   re-reads everything.
//!
//! Invariants:
//! - `open` returning `None` means the resource does not exist; read failures
//!   after a successful `open` are reported through `Resource::read`.
//! - Loaders are stateless after construction and safe to share.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::constants::{BUNDLE_LOCATION_PREFIX, FILESYSTEM_LOCATION_PREFIX};

/// An opened resource that can be read as bytes.
///
/// The `Display` implementation names the resource for log messages.
pub trait Resource: fmt::Display {
    /// Read the entire resource.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// Opens named resources from some backing store.
pub trait ResourceLoader {
    /// Open `name` relative to the loader's base location, or `None` when the
    /// resource does not exist.
    fn open(&self, name: &str) -> Option<Box<dyn Resource>>;

    /// The base location resources are opened under, for diagnostics.
    fn base_location(&self) -> &str;
}

// =============================================================================
// Filesystem loader
// =============================================================================

/// Loads resources from files under a base directory.
pub struct FileSystemResources {
    base: PathBuf,
    location: String,
}

impl FileSystemResources {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let location = base.display().to_string();
        Self { base, location }
    }
}

impl ResourceLoader for FileSystemResources {
    fn open(&self, name: &str) -> Option<Box<dyn Resource>> {
        let name = name.trim_start_matches('/');
        if name.is_empty() {
            return None;
        }
        let path = self.base.join(name);
        if path.is_file() {
            Some(Box::new(FileResource { path }))
        } else {
            None
        }
    }

    fn base_location(&self) -> &str {
        &self.location
    }
}

struct FileResource {
    path: PathBuf,
}

impl Resource for FileResource {
    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

impl fmt::Display for FileResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file:{}", self.path.display())
    }
}

// =============================================================================
// Bundled loader
// =============================================================================

/// An immutable set of named byte blobs bundled with the application,
/// typically filled from `include_bytes!` data. Cloning shares the entries.
#[derive(Clone, Default)]
pub struct Bundle {
    entries: HashMap<String, Arc<[u8]>>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous bytes under the same name.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries
            .insert(normalize_entry_name(&name.into()), bytes.into().into());
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    fn get(&self, name: &str) -> Option<Arc<[u8]>> {
        self.entries.get(name).cloned()
    }
}

fn normalize_entry_name(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

/// Loads resources from a `Bundle`, scoped under a base location.
pub struct BundledResources {
    bundle: Bundle,
    base: String,
}

impl BundledResources {
    /// Scope `bundle` under `base`. A base of `/` (or empty) means the bundle
    /// root; any other base is normalized to `segment/` form.
    pub fn new(bundle: Bundle, base: impl Into<String>) -> Self {
        let mut base = base.into().trim_start_matches('/').to_string();
        if !base.is_empty() && !base.ends_with('/') {
            base.push('/');
        }
        Self { bundle, base }
    }
}

impl ResourceLoader for BundledResources {
    fn open(&self, name: &str) -> Option<Box<dyn Resource>> {
        let name = format!("{}{}", self.base, name.trim_start_matches('/'));
        let bytes = self.bundle.get(&name)?;
        Some(Box::new(BundledResource { name, bytes }))
    }

    fn base_location(&self) -> &str {
        &self.base
    }
}

struct BundledResource {
    name: String,
    bytes: Arc<[u8]>,
}

impl Resource for BundledResource {
    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.to_vec())
    }
}

impl fmt::Display for BundledResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bundle:{}", self.name)
    }
}

// =============================================================================
// Prefix factory
// =============================================================================

/// Create a resource loader from a prefixed location string.
///
/// `filesystem:/etc/app/config` selects the filesystem loader and
/// `classpath:config` selects the bundled loader (reading from `bundle`).
/// A location with no prefix selects the bundled loader; an unknown prefix is
/// warned about and the whole location falls back to the bundled loader.
pub fn loader_for_location(location: &str, bundle: &Bundle) -> Box<dyn ResourceLoader> {
    let Some((scheme, rest)) = location.split_once(':') else {
        return Box::new(BundledResources::new(bundle.clone(), location));
    };

    let scheme_lower = scheme.to_lowercase();
    let prefixed = |prefix: &str| prefix.trim_end_matches(':') == scheme_lower;
    if prefixed(BUNDLE_LOCATION_PREFIX) {
        Box::new(BundledResources::new(bundle.clone(), rest))
    } else if prefixed(FILESYSTEM_LOCATION_PREFIX) {
        Box::new(FileSystemResources::new(rest))
    } else {
        warn!(
            scheme,
            "unsupported resource location prefix; falling back to the bundled loader"
        );
        Box::new(BundledResources::new(bundle.clone(), location))
    }
}
