//! Undo the colon escaping applied to route paths during route registration.
//!
//! Route discovery has to escape literal colons so the host router does not read them as its
//! own parameter syntax. How they are escaped depends on the HTTP adapter, so the adapter
//! flavor selects the rewrite.
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::route::RouteRecord;

static BRACED_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\{([^}]+)\}").expect("braced parameter pattern must compile"));

const BRACKETED_COLON: &str = "[:]";

/// HTTP adapter the routes were registered with.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "lowercase")]
pub enum AdapterFlavor {
    /// Escapes colons as `[:]`, e.g. `/cats/[:]id`.
    #[default]
    Express,
    /// Wraps parameter names in braces, e.g. `/cats/:{id}`.
    Fastify,
}

impl AdapterFlavor {
    /// Resolve flavor from the type name the HTTP adapter reports. Only `"fastify"` selects
    /// [`AdapterFlavor::Fastify`], any other adapter escapes like Express.
    pub fn from_adapter_type<S: AsRef<str>>(adapter_type: S) -> Self {
        if adapter_type.as_ref() == "fastify" {
            Self::Fastify
        } else {
            Self::Express
        }
    }
}

impl From<bool> for AdapterFlavor {
    /// `true` when the routes were registered through Fastify.
    fn from(using_fastify: bool) -> Self {
        if using_fastify {
            Self::Fastify
        } else {
            Self::Express
        }
    }
}

/// Rewrite escaped parameter markers of a single path into the `:name` template form.
///
/// Paths without escape markers are returned borrowed and unchanged.
///
/// # Examples
///
/// ```rust
/// # use swagger_paths::{unescape_colon, AdapterFlavor};
/// assert_eq!(unescape_colon("/cats/:{id}", AdapterFlavor::Fastify), "/cats/:id");
/// assert_eq!(unescape_colon("/cats/[:]id", AdapterFlavor::Express), "/cats/:id");
/// assert_eq!(unescape_colon("/cats", AdapterFlavor::Express), "/cats");
/// ```
pub fn unescape_colon(path: &str, flavor: AdapterFlavor) -> Cow<'_, str> {
    match flavor {
        AdapterFlavor::Fastify => BRACED_PARAMETER.replace_all(path, ":$1"),
        AdapterFlavor::Express if path.contains(BRACKETED_COLON) => {
            Cow::Owned(path.replace(BRACKETED_COLON, ":"))
        }
        AdapterFlavor::Express => Cow::Borrowed(path),
    }
}

/// Return copies of _`records`_ with [`RootFields::path`][crate::RootFields::path] unescaped
/// for given adapter _`flavor`_. Nothing else of the records is touched and records without
/// route identity are copied as is.
pub fn unescape_colons_in_path(records: &[RouteRecord], flavor: AdapterFlavor) -> Vec<RouteRecord> {
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if let Some(root) = record.root.as_mut() {
                let unescaped = match unescape_colon(&root.path, flavor) {
                    Cow::Owned(path) => Some(path),
                    Cow::Borrowed(_) => None,
                };
                if let Some(path) = unescaped {
                    tracing::trace!(from = %root.path, to = %path, "unescaped route path");
                    root.path = path;
                }
            }

            record
        })
        .collect()
}
