//! Strategies choosing the single route that represents a (path, method) pair.
//!
//! A route may be declared once per API version, but a rendered document holds exactly one
//! operation per path and method. [`DefaultGrouping`] keeps the last declaration,
//! [`VersionedGrouping`] resolves the declaration matching the document version.
use crate::route::RouteRecord;

/// Maps the global document version to candidate route versions, most preferred first.
///
/// Implemented for every `Fn(&str) -> Vec<String>`.
///
/// # Examples
///
/// _**Prefer the exact version, then unversioned fallbacks.**_
/// ```rust
/// # use swagger_paths::VersionExtractor;
/// let extractor = |version: &str| vec![version.to_string(), String::from("1")];
/// assert_eq!(extractor.extract("2"), ["2", "1"]);
/// ```
pub trait VersionExtractor {
    /// Return the ordered candidate versions for _`global_version`_.
    fn extract(&self, global_version: &str) -> Vec<String>;
}

impl<F> VersionExtractor for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn extract(&self, global_version: &str) -> Vec<String> {
        self(global_version)
    }
}

/// Policy picking one [`RouteRecord`] out of the records declared for the same path and method.
pub trait GroupingStrategy {
    /// Select the winning record. _`routes`_ share path and method and are in input order.
    /// Returns `None` only for an empty slice.
    fn select<'r>(&self, global_version: &str, routes: &[&'r RouteRecord])
        -> Option<&'r RouteRecord>;

    /// Whether the winning route's version is carried into the produced operation.
    fn keeps_version(&self) -> bool;
}

/// Group without version resolution: the last record of a (path, method) pair wins.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct DefaultGrouping;

impl GroupingStrategy for DefaultGrouping {
    fn select<'r>(
        &self,
        _global_version: &str,
        routes: &[&'r RouteRecord],
    ) -> Option<&'r RouteRecord> {
        routes.last().copied()
    }

    fn keeps_version(&self) -> bool {
        true
    }
}

/// Group with version resolution.
///
/// Candidates returned by the [`VersionExtractor`] are tried in order and the first record whose
/// version equals a candidate wins. Versions are compared as opaque strings. When no candidate
/// matches, the first declared record is used.
pub struct VersionedGrouping {
    extractor: Box<dyn VersionExtractor + Send + Sync>,
}

impl VersionedGrouping {
    /// Construct a new [`VersionedGrouping`] resolving candidates with given _`extractor`_.
    pub fn new<E: VersionExtractor + Send + Sync + 'static>(extractor: E) -> Self {
        Self {
            extractor: Box::new(extractor),
        }
    }
}

impl GroupingStrategy for VersionedGrouping {
    fn select<'r>(
        &self,
        global_version: &str,
        routes: &[&'r RouteRecord],
    ) -> Option<&'r RouteRecord> {
        let candidates = self.extractor.extract(global_version);
        let matched = candidates.iter().find_map(|candidate| {
            routes
                .iter()
                .find(|route| route.version() == Some(candidate.as_str()))
                .copied()
        });

        matched.or_else(|| {
            tracing::trace!(
                global_version,
                ?candidates,
                "no route version matched, using first declared route"
            );
            routes.first().copied()
        })
    }

    fn keeps_version(&self) -> bool {
        false
    }
}

/// Explicit choice between the two grouping strategies.
pub enum Grouping {
    /// See [`DefaultGrouping`].
    Default(DefaultGrouping),
    /// See [`VersionedGrouping`].
    Versioned(VersionedGrouping),
}

impl Grouping {
    /// Shorthand for [`Grouping::Versioned`] with given _`extractor`_.
    pub fn versioned<E: VersionExtractor + Send + Sync + 'static>(extractor: E) -> Self {
        Self::Versioned(VersionedGrouping::new(extractor))
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Self::Default(DefaultGrouping)
    }
}

impl GroupingStrategy for Grouping {
    fn select<'r>(
        &self,
        global_version: &str,
        routes: &[&'r RouteRecord],
    ) -> Option<&'r RouteRecord> {
        match self {
            Self::Default(grouping) => grouping.select(global_version, routes),
            Self::Versioned(grouping) => grouping.select(global_version, routes),
        }
    }

    fn keeps_version(&self) -> bool {
        match self {
            Self::Default(grouping) => grouping.keeps_version(),
            Self::Versioned(grouping) => grouping.keeps_version(),
        }
    }
}
