//! Implements [OpenAPI Extensions][extensions] carried by route records and operations.
//!
//! [extensions]: https://spec.openapis.org/oas/latest.html#specification-extensions
use std::{collections::BTreeMap, ops::Deref};

use serde::Serialize;

const EXTENSION_PREFIX: &str = "x-";

/// Additional [data for extending][extensions] an operation, e.g. `x-codeSamples`.
///
/// [extensions]: https://spec.openapis.org/oas/latest.html#specification-extensions
#[derive(Default, Serialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Extensions {
    #[serde(flatten)]
    extensions: BTreeMap<String, serde_json::Value>,
}

impl Extensions {
    /// Merge other [`Extensions`] into _`self`_. Keys of _`other`_ replace existing keys.
    pub fn merge(&mut self, other: Extensions) {
        self.extensions.extend(other.extensions);
    }

    /// Layer _`overrides`_ on top of _`base`_ key by key. Returns `None` when neither side
    /// declares any extension.
    pub fn layered(base: Option<&Extensions>, overrides: Option<&Extensions>) -> Option<Self> {
        match (base, overrides) {
            (None, None) => None,
            (base, overrides) => {
                let mut merged = base.cloned().unwrap_or_default();
                if let Some(overrides) = overrides {
                    merged.merge(overrides.clone());
                }

                Some(merged)
            }
        }
    }
}

impl Deref for Extensions {
    type Target = BTreeMap<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.extensions
    }
}

impl<K, V> FromIterator<(K, V)> for Extensions
where
    K: Into<String>,
    V: Into<serde_json::Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let extensions = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { extensions }
    }
}

impl<'de> serde::de::Deserialize<'de> for Extensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let extensions: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let extensions = extensions
            .into_iter()
            .filter(|(k, _)| k.starts_with(EXTENSION_PREFIX))
            .collect();
        Ok(Self { extensions })
    }
}
