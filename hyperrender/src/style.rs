//! Inline style serialization.
//!
//! Property names are hyphenated once and memoized in a process-wide
//! [`StyleNameCache`]. The cache is append-only and a pure function of its
//! key: two renderers racing on the same name at worst compute it twice.

use crate::value::Map;
use compact_str::CompactString;
use rapidhash::RapidHashMap;
use std::fmt::Write;
use std::sync::{LazyLock, PoisonError, RwLock};

/// Memo table from camel-case property names to their CSS form.
#[derive(Debug, Default)]
pub struct StyleNameCache {
    names: RwLock<RapidHashMap<CompactString, CompactString>>,
}

static GLOBAL: LazyLock<StyleNameCache> = LazyLock::new(StyleNameCache::new);

impl StyleNameCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every renderer in the process.
    pub fn global() -> &'static StyleNameCache {
        &GLOBAL
    }

    /// Hyphenated form of `name`, computed on first use.
    pub fn hyphenate(&self, name: &str) -> CompactString {
        // A poisoned lock still holds valid entries: nothing is ever
        // half-written.
        if let Some(hit) = self
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return hit.clone();
        }

        let hyphenated = hyphenate_style_name(name);
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(CompactString::from(name))
            .or_insert_with(|| hyphenated.clone());
        hyphenated
    }

    /// Number of memoized names.
    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `backgroundColor` → `background-color`, `MozTransition` →
/// `-moz-transition`, `msTransition` → `-ms-transition`.
///
/// Names that are already hyphenated (including custom properties such as
/// `--foo`) pass through unchanged.
pub fn hyphenate_style_name(name: &str) -> CompactString {
    let mut out = CompactString::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Serialize a style map as `name:value;name:value`.
///
/// Null entries are skipped, numbers get no unit, and a `cssText` entry is
/// spliced in verbatim. Returns an empty string when nothing is renderable.
pub fn stringify_styles(styles: &Map) -> String {
    stringify_styles_with(StyleNameCache::global(), styles)
}

/// [`stringify_styles`] against an explicit cache.
pub fn stringify_styles_with(cache: &StyleNameCache, styles: &Map) -> String {
    let mut out = String::new();
    let mut emitted = false;
    for (name, value) in styles {
        if value.is_null() {
            continue;
        }
        // an empty `cssText` still counts as an entry
        if emitted {
            out.push(';');
        }
        emitted = true;
        if name == "cssText" {
            let _ = write!(out, "{value}");
        } else {
            let _ = write!(out, "{}:{value}", cache.hyphenate(name));
        }
    }
    out
}
