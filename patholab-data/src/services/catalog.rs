//! Directory retrieval service
//!
//! Orchestrates endpoint resolution, the transport client and the record
//! normalizer for the six directory resource types. Two operations per
//! resource: free-text search and full listing. A 404 from the backend means
//! the collection is empty, not that the call failed; every other transport
//! failure surfaces as a retrieval error with a human-readable message.

use crate::endpoints::{resolve_list_all, resolve_search, ResourceType};
use crate::models::{
    AuxiliaryRecord, BillingRecord, EntityRecord, PathologistRecord, ResidentRecord, TestRecord,
};
use crate::normalize;
use crate::transport::{Transport, TransportError};
use patholab_common::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// Search and bulk-load access to the directory resources
pub struct CatalogService {
    transport: Arc<dyn Transport>,
}

impl CatalogService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    // ------------------------------------------------------------------
    // Search (free text)
    // ------------------------------------------------------------------

    pub async fn search_entities(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<EntityRecord>> {
        let raw = self
            .search_raw(ResourceType::Entity, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_entity).collect())
    }

    pub async fn search_residents(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<ResidentRecord>> {
        let raw = self
            .search_raw(ResourceType::Resident, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_resident).collect())
    }

    pub async fn search_pathologists(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<PathologistRecord>> {
        let raw = self
            .search_raw(ResourceType::Pathologist, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_pathologist).collect())
    }

    pub async fn search_auxiliaries(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<AuxiliaryRecord>> {
        let raw = self
            .search_raw(ResourceType::Auxiliary, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_auxiliary).collect())
    }

    pub async fn search_billing(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<BillingRecord>> {
        let raw = self
            .search_raw(ResourceType::Billing, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_billing).collect())
    }

    pub async fn search_tests(
        &self,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<TestRecord>> {
        let raw = self
            .search_raw(ResourceType::Test, query, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_test).collect())
    }

    // ------------------------------------------------------------------
    // Full listings
    // ------------------------------------------------------------------

    pub async fn list_entities(&self, include_inactive: bool) -> Result<Vec<EntityRecord>> {
        let raw = self.list_raw(ResourceType::Entity, include_inactive).await?;
        Ok(raw.iter().map(normalize::normalize_entity).collect())
    }

    pub async fn list_residents(&self, include_inactive: bool) -> Result<Vec<ResidentRecord>> {
        let raw = self
            .list_raw(ResourceType::Resident, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_resident).collect())
    }

    pub async fn list_pathologists(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<PathologistRecord>> {
        let raw = self
            .list_raw(ResourceType::Pathologist, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_pathologist).collect())
    }

    pub async fn list_auxiliaries(&self, include_inactive: bool) -> Result<Vec<AuxiliaryRecord>> {
        let raw = self
            .list_raw(ResourceType::Auxiliary, include_inactive)
            .await?;
        Ok(raw.iter().map(normalize::normalize_auxiliary).collect())
    }

    pub async fn list_billing(&self, include_inactive: bool) -> Result<Vec<BillingRecord>> {
        let raw = self.list_raw(ResourceType::Billing, include_inactive).await?;
        Ok(raw.iter().map(normalize::normalize_billing).collect())
    }

    pub async fn list_tests(&self, include_inactive: bool) -> Result<Vec<TestRecord>> {
        let raw = self.list_raw(ResourceType::Test, include_inactive).await?;
        Ok(raw.iter().map(normalize::normalize_test).collect())
    }

    // ------------------------------------------------------------------
    // Point lookups
    // ------------------------------------------------------------------

    /// Fetch a single entity by business code. A missing entity, an empty
    /// code, or any transport failure resolves to `None`; this lookup is
    /// best-effort by contract.
    pub async fn entity_by_code(&self, code: &str) -> Result<Option<EntityRecord>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let path = format!("{}/{}", ResourceType::Entity.segment(), code);
        match self.transport.get_json(&path, &[]).await {
            Ok(value) if value.is_object() => Ok(Some(normalize::normalize_entity(&value))),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::debug!(code = %code, error = %err, "entity lookup failed");
                Ok(None)
            }
        }
    }

    // ------------------------------------------------------------------
    // Shared plumbing
    // ------------------------------------------------------------------

    async fn search_raw(
        &self,
        resource: ResourceType,
        query: &str,
        include_inactive: bool,
    ) -> Result<Vec<Value>> {
        let query = query.trim();
        // An empty query is not "match all"
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let target = resolve_search(resource, query, include_inactive);
        tracing::debug!(resource = %resource, query = %query, include_inactive, "directory search");

        match self.transport.get_json(&target.path, &target.params).await {
            // Search responses are a bare array; anything else is empty
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => Ok(Vec::new()),
            Err(err) => self.recover(resource, err),
        }
    }

    async fn list_raw(
        &self,
        resource: ResourceType,
        include_inactive: bool,
    ) -> Result<Vec<Value>> {
        let target = resolve_list_all(resource, include_inactive);
        tracing::debug!(resource = %resource, include_inactive, "directory full load");

        match self.transport.get_json(&target.path, &target.params).await {
            Ok(value) => {
                let items = unwrap_list(resource, value);
                tracing::debug!(resource = %resource, count = items.len(), "directory loaded");
                Ok(items)
            }
            Err(err) => self.recover(resource, err),
        }
    }

    /// 404 recovers to an empty collection; everything else becomes a
    /// retrieval error, preferring the server-supplied message
    fn recover(&self, resource: ResourceType, err: TransportError) -> Result<Vec<Value>> {
        if err.is_not_found() {
            tracing::debug!(resource = %resource, "collection not found, treating as empty");
            return Ok(Vec::new());
        }

        tracing::warn!(resource = %resource, error = %err, "directory retrieval failed");
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Failed to load {}", resource.display_plural()));
        Err(Error::Retrieval(message))
    }
}

/// Listing payloads arrive either as a bare array, wrapped under `data`, or
/// wrapped under the resource's plural name, depending on backend version
fn unwrap_list(resource: ResourceType, value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            for key in ["data", resource.plural_field()] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return items;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
