//! Field Projector
//!
//! Flattens matched datastore-cluster objects into plain output records.
//! Capacity figures are reported in bytes plus binary GB/TB (divide by
//! 1024³ / 1024⁴, rounded to 2 decimal places); member datastores carry
//! the same GB rule with no TB field. Datastore order follows the source
//! inventory's child-entity order.

use crate::domain::ports::{DatastoreClusterSummary, DatastoreSummary};
use serde::{Deserialize, Serialize};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const TIB: f64 = GIB * 1024.0;

// =============================================================================
// Unit Conversions
// =============================================================================

/// Bytes to binary gigabytes, rounded to 2 decimal places
pub fn to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / GIB)
}

/// Bytes to binary terabytes, rounded to 2 decimal places
pub fn to_tb(bytes: u64) -> f64 {
    round2(bytes as f64 / TIB)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Output Records
// =============================================================================

/// Flattened member-datastore entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatastoreRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub datastore_type: String,
    pub capacity: u64,
    pub capacity_gb: f64,
    pub free_space: u64,
    pub free_space_gb: f64,
}

/// Flattened datastore-cluster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatastoreClusterRecord {
    pub name: String,
    pub capacity: u64,
    pub capacity_gb: f64,
    pub capacity_tb: f64,
    pub free_space: u64,
    pub free_space_gb: f64,
    pub free_space_tb: f64,
    pub sdrs_enabled: bool,
    pub automation_level: String,
    pub keep_vmdks_together: bool,
    pub load_balance_interval: u64,
    pub io_loadbalance_enabled: bool,
    pub datastores: Vec<DatastoreRecord>,
}

// =============================================================================
// Projection
// =============================================================================

/// Project one matched cluster and its member datastores into a record
pub fn project_cluster(
    cluster: &DatastoreClusterSummary,
    datastores: &[DatastoreSummary],
) -> DatastoreClusterRecord {
    DatastoreClusterRecord {
        name: cluster.name.clone(),
        capacity: cluster.capacity_bytes,
        capacity_gb: to_gb(cluster.capacity_bytes),
        capacity_tb: to_tb(cluster.capacity_bytes),
        free_space: cluster.free_space_bytes,
        free_space_gb: to_gb(cluster.free_space_bytes),
        free_space_tb: to_tb(cluster.free_space_bytes),
        sdrs_enabled: cluster.sdrs.enabled,
        automation_level: cluster.sdrs.automation_level.clone(),
        keep_vmdks_together: cluster.sdrs.keep_vmdks_together,
        load_balance_interval: cluster.sdrs.load_balance_interval,
        io_loadbalance_enabled: cluster.sdrs.io_load_balance_enabled,
        datastores: datastores.iter().map(project_datastore).collect(),
    }
}

fn project_datastore(datastore: &DatastoreSummary) -> DatastoreRecord {
    DatastoreRecord {
        name: datastore.name.clone(),
        datastore_type: datastore.datastore_type.clone(),
        capacity: datastore.capacity_bytes,
        capacity_gb: to_gb(datastore.capacity_bytes),
        free_space: datastore.free_space_bytes,
        free_space_gb: to_gb(datastore.free_space_bytes),
    }
}
