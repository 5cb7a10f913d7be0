//! Query Filter Set
//!
//! Composable scopes that describe one fetch. Each operation lists the
//! scopes it needs and `compose` folds them, in order, into a single
//! `FetchSpec` for the store:
//!
//! ```text
//! [with_details(), by_type("Task"), by_name_substring("kan"), limit(10)]
//!     -> filters  [has versions, LOWER(type) = "task", LOWER(name) LIKE "%kan%"]
//!        order    [rating DESC, name ASC]
//!        preload  tags (by name), versions (by version)
//!        limit    10
//! ```
//!
//! Scope constructors given an empty string return `Scope::Noop`, so
//! optional payload fields can be passed straight through.

use hub_storage::{FetchSpec, Filter, OrderBy, Preload, ResourceId, VersionPreload};

/// One composable unit of a fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// Contributes nothing
    Noop,
    /// AND-ed with every other filter
    Filter(Filter),
    /// Appended after earlier ordering clauses
    Order(OrderBy),
    /// Replaces any earlier preload
    Preload(Preload),
    /// Replaces any earlier limit
    Limit(usize),
    /// Several scopes applied in sequence
    Chain(Vec<Scope>),
}

impl Scope {
    fn apply(self, mut spec: FetchSpec) -> FetchSpec {
        match self {
            Scope::Noop => spec,
            Scope::Filter(filter) => spec.filter(filter),
            Scope::Order(order) => {
                if !spec.order.contains(&order) {
                    spec.order.push(order);
                }
                spec
            }
            Scope::Preload(preload) => spec.preload(preload),
            Scope::Limit(n) => spec.limit(n),
            Scope::Chain(scopes) => scopes.into_iter().fold(spec, |acc, s| s.apply(acc)),
        }
    }
}

/// Fold scopes, in order, into one fetch specification
pub fn compose(scopes: impl IntoIterator<Item = Scope>) -> FetchSpec {
    scopes
        .into_iter()
        .fold(FetchSpec::new(), |spec, scope| scope.apply(spec))
}

/// Case-insensitive type equality
pub fn by_type(kind: &str) -> Scope {
    if kind.is_empty() {
        return Scope::Noop;
    }
    Scope::Filter(Filter::type_equals(kind))
}

/// Case-insensitive name equality
pub fn by_name_exact(name: &str) -> Scope {
    if name.is_empty() {
        return Scope::Noop;
    }
    Scope::Filter(Filter::name_equals(name))
}

/// Case-insensitive name substring match
pub fn by_name_substring(name: &str) -> Scope {
    if name.is_empty() {
        return Scope::Noop;
    }
    Scope::Filter(Filter::name_contains(name))
}

pub fn by_resource_id(id: ResourceId) -> Scope {
    Scope::Filter(Filter::ResourceId(id))
}

/// Rating descending, then name ascending
pub fn order_by_rating() -> Scope {
    Scope::Order(OrderBy::RatingDescNameAsc)
}

pub fn order_by_version() -> Scope {
    Scope::Order(OrderBy::VersionAsc)
}

/// Catalog, name-ordered tags and every version, best rated first
///
/// Resources without any version are left out here so a limit counts only
/// resources that can be answered.
pub fn with_details() -> Scope {
    Scope::Chain(vec![
        Scope::Filter(Filter::HasVersions),
        order_by_rating(),
        Scope::Preload(Preload::details()),
    ])
}

/// `with_details`, with versions restricted to one exact version string
pub fn with_specific_version(version: &str) -> Scope {
    Scope::Chain(vec![
        with_details(),
        Scope::Preload(Preload {
            tags: true,
            versions: Some(VersionPreload::exact(version)),
        }),
    ])
}

pub fn limit(n: usize) -> Scope {
    Scope::Limit(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_arguments_are_noops() {
        assert_eq!(by_type(""), Scope::Noop);
        assert_eq!(by_name_exact(""), Scope::Noop);
        assert_eq!(by_name_substring(""), Scope::Noop);
        assert_eq!(compose(vec![by_type(""), by_name_substring("")]), FetchSpec::new());
    }

    #[test]
    fn test_query_composition() {
        let spec = compose(vec![
            with_details(),
            by_type("Task"),
            by_name_substring("Kan"),
            limit(10),
        ]);

        assert_eq!(
            spec.filters,
            vec![
                Filter::HasVersions,
                Filter::TypeEquals("task".into()),
                Filter::NameContains("kan".into())
            ]
        );
        assert_eq!(spec.order, vec![OrderBy::RatingDescNameAsc]);
        assert_eq!(spec.preload, Preload::details());
        assert_eq!(spec.limit, Some(10));
    }

    #[test]
    fn test_query_without_filters_equals_list() {
        let query = compose(vec![with_details(), by_type(""), by_name_substring(""), limit(5)]);
        let list = compose(vec![with_details(), limit(5)]);
        assert_eq!(query, list);
    }

    #[test]
    fn test_specific_version_refines_details() {
        let spec = compose(vec![
            with_specific_version("0.2"),
            by_type("task"),
            by_name_exact("Buildah"),
        ]);

        assert_eq!(spec.preload.versions, Some(VersionPreload::exact("0.2")));
        assert!(spec.preload.tags);
        assert_eq!(spec.order, vec![OrderBy::RatingDescNameAsc]);
        assert_eq!(spec.filters.len(), 3);
    }

    #[test]
    fn test_versions_by_id_composition() {
        let spec = compose(vec![order_by_version(), by_resource_id(7)]);

        assert_eq!(spec.filters, vec![Filter::ResourceId(7)]);
        assert_eq!(spec.order, vec![OrderBy::VersionAsc]);
        assert_eq!(spec.preload, Preload::none());
        assert_eq!(spec.limit, None);
    }

    #[test]
    fn test_later_limit_wins_and_orders_are_not_duplicated() {
        let spec = compose(vec![limit(3), with_details(), order_by_rating(), limit(1)]);
        assert_eq!(spec.limit, Some(1));
        assert_eq!(spec.order, vec![OrderBy::RatingDescNameAsc]);
    }
}
