//! Datastore-Cluster Gathering
//!
//! Single linear pass per invocation: validate parameters, resolve the
//! scoping context (fail fast), enumerate matching clusters, project each
//! into an output record. No retries and no partial results; a resolution
//! failure aborts the whole run.

pub mod enumerator;
pub mod projector;
pub mod resolver;

pub use enumerator::{ClusterEnumerator, QueryMode};
pub use projector::{DatastoreClusterRecord, DatastoreRecord};
pub use resolver::{ContextResolver, ResolutionContext};

use crate::config::QueryParams;
use crate::domain::ports::InventoryProviderRef;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Gather Report
// =============================================================================

/// Result object emitted by a gathering run
///
/// `changed` is always false: gathering never mutates the remote inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatherReport {
    pub changed: bool,
    pub datastore_clusters: Vec<DatastoreClusterRecord>,
}

// =============================================================================
// Gatherer
// =============================================================================

/// Orchestrates one read-only gathering run against the inventory
pub struct DatastoreClusterGatherer {
    provider: InventoryProviderRef,
    params: QueryParams,
}

impl DatastoreClusterGatherer {
    pub fn new(provider: InventoryProviderRef, params: QueryParams) -> Self {
        Self { provider, params }
    }

    /// Run the gathering pass
    ///
    /// The context is resolved before any cluster lookup even when the query
    /// mode does not consume it, so an invalid scope always fails fast.
    pub async fn gather(&self) -> Result<GatherReport> {
        self.params.validate()?;

        let context = ContextResolver::new(self.provider.as_ref())
            .resolve(&self.params)
            .await?;
        debug!("Gathering within context {:?}", context);

        let mode = QueryMode::from_params(&self.params);
        let matched = ClusterEnumerator::new(self.provider.as_ref())
            .enumerate(&mode)
            .await?;

        let mut records = Vec::with_capacity(matched.len());
        for cluster in &matched {
            let members = self.provider.member_datastores(&cluster.id).await?;
            debug!(
                "Projecting cluster '{}' with {} member datastore(s)",
                cluster.name,
                members.len()
            );
            records.push(projector::project_cluster(cluster, &members));
        }

        info!("Gathered {} datastore cluster record(s)", records.len());
        Ok(GatherReport {
            changed: false,
            datastore_clusters: records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::fixture::{cluster, datastore, MemoryInventory};
    use crate::error::Error;
    use assert_matches::assert_matches;
    use std::sync::Arc;

    /// Inventory for the end-to-end scenario: DC1 holds dsc1 with two
    /// member datastores.
    fn dc1_inventory() -> Arc<MemoryInventory> {
        Arc::new(
            MemoryInventory::new()
                .with_datacenter("datacenter-2", "DC1")
                .with_cluster(cluster(
                    "group-p1",
                    "dsc1",
                    "DC1",
                    6_442_450_944,
                    3_221_225_472,
                ))
                .with_member(
                    "group-p1",
                    datastore("datastore-11", "ds_01", 2_147_483_648, 1_073_741_824),
                )
                .with_member(
                    "group-p1",
                    datastore("datastore-12", "ds_02", 4_294_967_296, 2_147_483_648),
                ),
        )
    }

    fn by_datacenter(name: &str) -> QueryParams {
        QueryParams {
            datacenter_name: Some(name.to_string()),
            ..QueryParams::default()
        }
    }

    #[tokio::test]
    async fn test_gather_by_datacenter_end_to_end() {
        let gatherer = DatastoreClusterGatherer::new(dc1_inventory(), by_datacenter("DC1"));
        let report = gatherer.gather().await.unwrap();

        assert!(!report.changed);
        assert_eq!(report.datastore_clusters.len(), 1);

        let record = &report.datastore_clusters[0];
        assert_eq!(record.name, "dsc1");
        assert_eq!(record.datastores.len(), 2);
        assert_eq!(record.datastores[0].name, "ds_01");
        assert_eq!(record.datastores[0].capacity_gb, 2.0);
        assert_eq!(record.datastores[0].free_space_gb, 1.0);
        assert_eq!(record.datastores[1].name, "ds_02");
        assert_eq!(record.datastores[1].capacity_gb, 4.0);
        assert_eq!(record.datastores[1].free_space_gb, 2.0);
    }

    #[tokio::test]
    async fn test_gather_is_idempotent() {
        let gatherer = DatastoreClusterGatherer::new(dc1_inventory(), by_datacenter("DC1"));

        let first = gatherer.gather().await.unwrap();
        let second = gatherer.gather().await.unwrap();
        assert_eq!(first, second);
        assert!(!second.changed);
    }

    #[tokio::test]
    async fn test_gather_validates_before_inventory_calls() {
        let gatherer =
            DatastoreClusterGatherer::new(dc1_inventory(), QueryParams::default());

        let err = gatherer.gather().await.unwrap_err();
        assert_matches!(err, Error::Configuration(_));
    }

    #[tokio::test]
    async fn test_gather_named_cluster_missing_fails_without_records() {
        let params = QueryParams {
            datacenter_name: Some("DC1".into()),
            datastore_cluster_name: Some("missing".into()),
            folder: None,
        };
        let gatherer = DatastoreClusterGatherer::new(dc1_inventory(), params);

        let err = gatherer.gather().await.unwrap_err();
        assert_matches!(err, Error::ClusterNotFound { .. });
    }

    #[tokio::test]
    async fn test_gather_fails_fast_on_bad_scope_even_with_named_cluster() {
        let params = QueryParams {
            datacenter_name: Some("DC9".into()),
            datastore_cluster_name: Some("dsc1".into()),
            folder: None,
        };
        let gatherer = DatastoreClusterGatherer::new(dc1_inventory(), params);

        let err = gatherer.gather().await.unwrap_err();
        assert_matches!(err, Error::DatacenterNotFound { .. });
    }

    #[tokio::test]
    async fn test_gather_folder_scope_enumerates_inventory_wide() {
        let inv = Arc::new(
            MemoryInventory::new()
                .with_folder("group-s24", "/DC1/datastore")
                .with_cluster(cluster("group-p1", "dsc1", "DC1", 100, 50))
                .with_cluster(cluster("group-p2", "dsc2", "DC2", 200, 80)),
        );
        let params = QueryParams {
            folder: Some("/DC1/datastore".into()),
            ..QueryParams::default()
        };

        let report = DatastoreClusterGatherer::new(inv, params).gather().await.unwrap();
        assert_eq!(report.datastore_clusters.len(), 2);
    }

    #[tokio::test]
    async fn test_gather_empty_scope_yields_empty_report() {
        let inv = Arc::new(MemoryInventory::new().with_datacenter("datacenter-9", "empty-dc"));
        let report = DatastoreClusterGatherer::new(inv, by_datacenter("empty-dc"))
            .gather()
            .await
            .unwrap();

        assert!(report.datastore_clusters.is_empty());
        assert!(!report.changed);
    }
}
