//! Request target construction per resource type
//!
//! The backend exposes structurally different routes per resource: entities
//! model their inactive records as a separate collection view, everything
//! else takes a `/search` sub-path, and the bulk-listing caps differ (the
//! plain entity listing truncates at 100, the search endpoints accept 1000).
//! Using the wrong shape silently truncates, so the differences are encoded
//! here and nowhere else.

use serde::{Deserialize, Serialize};

/// Listing cap of the plain entity collection endpoint
const ENTITY_PAGE_LIMIT: u32 = 100;

/// Listing cap of the search endpoints used for full loads
const SEARCH_PAGE_LIMIT: u32 = 1000;

/// The fixed set of directory resources served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Entity,
    Resident,
    Pathologist,
    Auxiliary,
    Billing,
    Test,
}

impl ResourceType {
    /// Base path segment on the backend
    pub fn segment(&self) -> &'static str {
        match self {
            ResourceType::Entity => "entities",
            ResourceType::Resident => "residents",
            ResourceType::Pathologist => "pathologists",
            ResourceType::Auxiliary => "auxiliaries",
            ResourceType::Billing => "billing",
            ResourceType::Test => "tests",
        }
    }

    /// Plural field name under which some backend versions wrap list payloads
    pub fn plural_field(&self) -> &'static str {
        self.segment()
    }

    /// Human-readable plural used in fallback error messages
    pub fn display_plural(&self) -> &'static str {
        match self {
            ResourceType::Entity => "entities",
            ResourceType::Resident => "residents",
            ResourceType::Pathologist => "pathologists",
            ResourceType::Auxiliary => "auxiliaries",
            ResourceType::Billing => "billing users",
            ResourceType::Test => "tests",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

/// A fully resolved request target: path plus query parameters.
///
/// Parameters stay as pairs; the transport percent-encodes them when the URL
/// is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RequestTarget {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: Vec::new(),
        }
    }

    fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }
}

/// Build the search target for a resource.
///
/// The query text is trimmed here; callers short-circuit on an empty query
/// before ever reaching this point, but trimming is repeated so the target
/// is well-formed regardless of the caller.
pub fn resolve_search(resource: ResourceType, query: &str, include_inactive: bool) -> RequestTarget {
    let query = query.trim();

    match resource {
        ResourceType::Entity => {
            // Inactive entities live under a separate collection view
            let path = if include_inactive {
                format!("{}/inactive", resource.segment())
            } else {
                resource.segment().to_string()
            };
            RequestTarget::new(path).with("query", query)
        }
        _ => {
            let target =
                RequestTarget::new(format!("{}/search", resource.segment())).with("q", query);
            if include_inactive {
                // Legacy deployments read absence of the parameter as
                // "active only"; never send include_inactive=false
                target.with("include_inactive", "true")
            } else {
                target
            }
        }
    }
}

/// Build the bulk-listing target for a resource
pub fn resolve_list_all(resource: ResourceType, include_inactive: bool) -> RequestTarget {
    match resource {
        ResourceType::Entity => {
            let path = if include_inactive {
                format!("{}/inactive", resource.segment())
            } else {
                resource.segment().to_string()
            };
            RequestTarget::new(path)
                .with("skip", 0)
                .with("limit", ENTITY_PAGE_LIMIT)
        }
        ResourceType::Resident => {
            // The plain residents listing caps at 100 records; the search
            // endpoint with an explicit limit returns the full set and
            // filters on an explicit is_active flag
            RequestTarget::new(format!("{}/search", resource.segment()))
                .with("skip", 0)
                .with("limit", SEARCH_PAGE_LIMIT)
                .with("is_active", !include_inactive)
        }
        _ => {
            let path = if include_inactive {
                format!("{}/search", resource.segment())
            } else {
                resource.segment().to_string()
            };
            RequestTarget::new(path)
                .with("skip", 0)
                .with("limit", SEARCH_PAGE_LIMIT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(target: &'a RequestTarget, key: &str) -> Option<&'a str> {
        target
            .params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn entity_search_routes_inactive_to_separate_path() {
        let active = resolve_search(ResourceType::Entity, "clinic", false);
        assert_eq!(active.path, "entities");
        assert_eq!(param(&active, "query"), Some("clinic"));

        let inactive = resolve_search(ResourceType::Entity, "clinic", true);
        assert_eq!(inactive.path, "entities/inactive");
        assert_eq!(param(&inactive, "query"), Some("clinic"));
    }

    #[test]
    fn non_entity_search_uses_search_subpath() {
        let target = resolve_search(ResourceType::Resident, "ana", false);
        assert_eq!(target.path, "residents/search");
        assert_eq!(param(&target, "q"), Some("ana"));
        // Absence, not false, signals active-only
        assert_eq!(param(&target, "include_inactive"), None);
    }

    #[test]
    fn include_inactive_parameter_only_when_requested() {
        let target = resolve_search(ResourceType::Pathologist, "ana", true);
        assert_eq!(target.path, "pathologists/search");
        assert_eq!(param(&target, "include_inactive"), Some("true"));
    }

    #[test]
    fn search_trims_query_text() {
        let target = resolve_search(ResourceType::Test, "  biopsy  ", false);
        assert_eq!(param(&target, "q"), Some("biopsy"));
    }

    #[test]
    fn entity_listing_keeps_small_page_limit() {
        let target = resolve_list_all(ResourceType::Entity, false);
        assert_eq!(target.path, "entities");
        assert_eq!(param(&target, "skip"), Some("0"));
        assert_eq!(param(&target, "limit"), Some("100"));

        let inactive = resolve_list_all(ResourceType::Entity, true);
        assert_eq!(inactive.path, "entities/inactive");
    }

    #[test]
    fn resident_listing_always_goes_through_search() {
        let active = resolve_list_all(ResourceType::Resident, false);
        assert_eq!(active.path, "residents/search");
        assert_eq!(param(&active, "limit"), Some("1000"));
        assert_eq!(param(&active, "is_active"), Some("true"));

        let inactive = resolve_list_all(ResourceType::Resident, true);
        assert_eq!(inactive.path, "residents/search");
        assert_eq!(param(&inactive, "is_active"), Some("false"));
    }

    #[test]
    fn other_listings_switch_path_on_inactive() {
        for resource in [
            ResourceType::Pathologist,
            ResourceType::Auxiliary,
            ResourceType::Billing,
            ResourceType::Test,
        ] {
            let active = resolve_list_all(resource, false);
            assert_eq!(active.path, resource.segment());
            assert_eq!(param(&active, "limit"), Some("1000"));

            let inactive = resolve_list_all(resource, true);
            assert_eq!(inactive.path, format!("{}/search", resource.segment()));
            assert_eq!(param(&inactive, "skip"), Some("0"));
        }
    }
}
