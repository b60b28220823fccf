//! Domain Ports - Core trait definitions for the inventory collector
//!
//! These traits define the boundary between the gathering logic and the
//! remote vCenter inventory. Adapters implement them to provide concrete
//! lookups; tests implement them in memory.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Inventory References
// =============================================================================

/// Reference to a datacenter in the vCenter inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatacenterRef {
    /// vCenter managed object identifier (e.g. `datacenter-2`)
    pub id: String,
    /// Display name (case sensitive)
    pub name: String,
}

/// Reference to an inventory folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    /// vCenter managed object identifier (e.g. `group-s24`)
    pub id: String,
    /// Absolute inventory path the folder was resolved from
    pub path: String,
}

// =============================================================================
// Datastore Cluster Types
// =============================================================================

/// Storage DRS configuration of a datastore cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageDrsConfig {
    /// Whether Storage DRS is enabled on the pod
    pub enabled: bool,
    /// Default VM behavior: `manual` or `automated`
    pub automation_level: String,
    /// Default intra-VM affinity (keep a VM's disks on one datastore)
    pub keep_vmdks_together: bool,
    /// Load balance interval in minutes
    pub load_balance_interval: u64,
    /// Whether I/O load balancing is enabled
    pub io_load_balance_enabled: bool,
}

/// Summary of a datastore cluster (Storage DRS pod) as read from inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatastoreClusterSummary {
    /// vCenter managed object identifier (e.g. `group-p42`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Name of the parent datacenter
    pub datacenter: String,
    /// Total capacity in bytes
    pub capacity_bytes: u64,
    /// Free space in bytes
    pub free_space_bytes: u64,
    /// Storage DRS configuration
    pub sdrs: StorageDrsConfig,
}

/// Summary of a member datastore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatastoreSummary {
    /// vCenter managed object identifier (e.g. `datastore-11`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Storage type (e.g. `VMFS`, `NFS`, `VSAN`)
    pub datastore_type: String,
    /// Total capacity in bytes
    pub capacity_bytes: u64,
    /// Free space in bytes
    pub free_space_bytes: u64,
}

// =============================================================================
// Inventory Provider Port
// =============================================================================

/// Port for read-only vCenter inventory lookups
///
/// All lookups are by-value snapshots; the provider holds the session and the
/// caller never observes live managed objects.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Resolve a datacenter by display name
    async fn find_datacenter_by_name(&self, name: &str) -> Result<Option<DatacenterRef>>;

    /// Resolve an inventory folder from an absolute path
    /// (e.g. `/datacenter1/datastore/folder1`)
    async fn find_folder_by_path(&self, path: &str) -> Result<Option<FolderRef>>;

    /// Look up a single datastore cluster by display name
    async fn find_datastore_cluster_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DatastoreClusterSummary>>;

    /// Enumerate all datastore clusters in the inventory, in inventory order
    async fn list_datastore_clusters(&self) -> Result<Vec<DatastoreClusterSummary>>;

    /// Expand the member datastores of a cluster, in child-entity order
    async fn member_datastores(&self, cluster_id: &str) -> Result<Vec<DatastoreSummary>>;
}

pub type InventoryProviderRef = Arc<dyn InventoryProvider>;

// =============================================================================
// In-Memory Fixture (tests)
// =============================================================================
