//! REST Inventory Client
//!
//! Implements the [`InventoryProvider`] port over the vCenter Automation
//! API. Lookups are by-value snapshots: list endpoints identify objects,
//! detail endpoints supply capacity and Storage DRS configuration, and the
//! client joins datacenter identifiers back to display names for the
//! parent-datacenter filter.

use crate::domain::ports::{
    DatacenterRef, DatastoreClusterSummary, DatastoreSummary, FolderRef, InventoryProvider,
    StorageDrsConfig,
};
use crate::error::Result;
use crate::vsphere::session::VsphereSession;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;
use urlencoding::encode;

const DATACENTER_PATH: &str = "/rest/vcenter/datacenter";
const FOLDER_PATH: &str = "/rest/vcenter/folder";
const DATASTORE_PATH: &str = "/rest/vcenter/datastore";
const DATASTORE_CLUSTER_PATH: &str = "/rest/vcenter/datastore-cluster";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct DatacenterItem {
    datacenter: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FolderItem {
    folder: String,
}

#[derive(Debug, Deserialize)]
struct DatastoreClusterItem {
    datastore_cluster: String,
}

#[derive(Debug, Deserialize)]
struct DatastoreClusterDetail {
    name: String,
    datacenter: String,
    capacity: u64,
    free_space: u64,
    sdrs_enabled: bool,
    automation_level: String,
    keep_vmdks_together: bool,
    load_balance_interval: u64,
    io_load_balance_enabled: bool,
    #[serde(default)]
    datastores: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DatastoreDetail {
    name: String,
    #[serde(rename = "type")]
    datastore_type: String,
    capacity: u64,
    free_space: u64,
}

// =============================================================================
// Inventory Path Parsing
// =============================================================================

/// Split an absolute inventory path into its segments
///
/// Leading/trailing slashes and empty segments are discarded, so
/// `/DC1/datastore/folder1` and `DC1/datastore/folder1` are equivalent.
fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

// =============================================================================
// REST Client
// =============================================================================

/// Inventory provider backed by an authenticated vCenter session
pub struct RestInventoryClient {
    session: VsphereSession,
}

impl RestInventoryClient {
    pub fn new(session: VsphereSession) -> Self {
        Self { session }
    }

    /// Release the underlying session (best effort)
    pub async fn close(&self) {
        self.session.logout().await;
    }

    /// Map of datacenter identifier to display name, fetched fresh per call
    async fn datacenter_names(&self) -> Result<BTreeMap<String, String>> {
        let items: Vec<DatacenterItem> = self.session.get(DATACENTER_PATH, &[]).await?;
        Ok(items
            .into_iter()
            .map(|item| (item.datacenter, item.name))
            .collect())
    }

    /// Fetch a cluster detail and join the parent-datacenter name
    async fn cluster_summary(
        &self,
        cluster_id: &str,
        datacenters: &BTreeMap<String, String>,
    ) -> Result<DatastoreClusterSummary> {
        let detail: DatastoreClusterDetail = self
            .session
            .get(&format!("{}/{}", DATASTORE_CLUSTER_PATH, encode(cluster_id)), &[])
            .await?;

        let datacenter = datacenters
            .get(&detail.datacenter)
            .cloned()
            .unwrap_or(detail.datacenter);

        Ok(DatastoreClusterSummary {
            id: cluster_id.to_string(),
            name: detail.name,
            datacenter,
            capacity_bytes: detail.capacity,
            free_space_bytes: detail.free_space,
            sdrs: StorageDrsConfig {
                enabled: detail.sdrs_enabled,
                automation_level: detail.automation_level,
                keep_vmdks_together: detail.keep_vmdks_together,
                load_balance_interval: detail.load_balance_interval,
                io_load_balance_enabled: detail.io_load_balance_enabled,
            },
        })
    }

    /// Member datastore identifiers of a cluster, in child-entity order
    async fn member_ids(&self, cluster_id: &str) -> Result<Vec<String>> {
        let detail: DatastoreClusterDetail = self
            .session
            .get(&format!("{}/{}", DATASTORE_CLUSTER_PATH, encode(cluster_id)), &[])
            .await?;
        Ok(detail.datastores)
    }
}

#[async_trait]
impl InventoryProvider for RestInventoryClient {
    async fn find_datacenter_by_name(&self, name: &str) -> Result<Option<DatacenterRef>> {
        let items: Vec<DatacenterItem> = self
            .session
            .get(DATACENTER_PATH, &[("filter.names", name)])
            .await?;

        Ok(items.into_iter().next().map(|item| DatacenterRef {
            id: item.datacenter,
            name: item.name,
        }))
    }

    async fn find_folder_by_path(&self, path: &str) -> Result<Option<FolderRef>> {
        let segments = path_segments(path);
        let Some(folder_name) = segments.last().copied() else {
            return Ok(None);
        };

        // The path may carry the datacenter anywhere before the datastore
        // root (e.g. /folder1/datacenter1/datastore/folder2); scope the
        // folder query to it when one is recognized.
        let datacenters = self.datacenter_names().await?;
        let scope = segments.iter().find_map(|segment| {
            datacenters
                .iter()
                .find(|(_, name)| name.as_str() == *segment)
                .map(|(id, _)| id.clone())
        });

        let mut query = vec![
            ("filter.type", "DATASTORE"),
            ("filter.names", folder_name),
        ];
        if let Some(dc_id) = scope.as_deref() {
            query.push(("filter.datacenters", dc_id));
        }
        let items: Vec<FolderItem> = self.session.get(FOLDER_PATH, &query).await?;
        debug!("Folder lookup for '{}' matched {} object(s)", path, items.len());

        Ok(items.into_iter().next().map(|item| FolderRef {
            id: item.folder,
            path: path.to_string(),
        }))
    }

    async fn find_datastore_cluster_by_name(
        &self,
        name: &str,
    ) -> Result<Option<DatastoreClusterSummary>> {
        let items: Vec<DatastoreClusterItem> = self
            .session
            .get(DATASTORE_CLUSTER_PATH, &[("filter.names", name)])
            .await?;

        let Some(item) = items.into_iter().next() else {
            return Ok(None);
        };

        let datacenters = self.datacenter_names().await?;
        let summary = self.cluster_summary(&item.datastore_cluster, &datacenters).await?;
        Ok(Some(summary))
    }

    async fn list_datastore_clusters(&self) -> Result<Vec<DatastoreClusterSummary>> {
        let items: Vec<DatastoreClusterItem> =
            self.session.get(DATASTORE_CLUSTER_PATH, &[]).await?;
        let datacenters = self.datacenter_names().await?;

        let mut clusters = Vec::with_capacity(items.len());
        for item in &items {
            clusters.push(self.cluster_summary(&item.datastore_cluster, &datacenters).await?);
        }
        Ok(clusters)
    }

    async fn member_datastores(&self, cluster_id: &str) -> Result<Vec<DatastoreSummary>> {
        let ids = self.member_ids(cluster_id).await?;

        let mut members = Vec::with_capacity(ids.len());
        for id in ids {
            let detail: DatastoreDetail = self
                .session
                .get(&format!("{}/{}", DATASTORE_PATH, encode(&id)), &[])
                .await?;
            members.push(DatastoreSummary {
                id,
                name: detail.name,
                datastore_type: detail.datastore_type,
                capacity_bytes: detail.capacity,
                free_space_bytes: detail.free_space,
            });
        }
        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_normalization() {
        assert_eq!(
            path_segments("/DC1/datastore/folder1"),
            vec!["DC1", "datastore", "folder1"]
        );
        assert_eq!(
            path_segments("DC1/datastore/folder1"),
            vec!["DC1", "datastore", "folder1"]
        );
        assert_eq!(
            path_segments("/folder1/DC1/datastore/folder2/"),
            vec!["folder1", "DC1", "datastore", "folder2"]
        );
        assert!(path_segments("//").is_empty());
    }

    #[test]
    fn test_cluster_detail_deserialization() {
        let detail: DatastoreClusterDetail = serde_json::from_str(
            r#"{
                "name": "dsc1",
                "datacenter": "datacenter-2",
                "capacity": 6442450944,
                "free_space": 3221225472,
                "sdrs_enabled": true,
                "automation_level": "automated",
                "keep_vmdks_together": true,
                "load_balance_interval": 480,
                "io_load_balance_enabled": false,
                "datastores": ["datastore-11", "datastore-12"]
            }"#,
        )
        .unwrap();

        assert_eq!(detail.name, "dsc1");
        assert_eq!(detail.capacity, 6_442_450_944);
        assert_eq!(detail.load_balance_interval, 480);
        assert_eq!(detail.datastores.len(), 2);
    }

    #[test]
    fn test_cluster_detail_tolerates_missing_members() {
        let detail: DatastoreClusterDetail = serde_json::from_str(
            r#"{
                "name": "empty",
                "datacenter": "datacenter-2",
                "capacity": 0,
                "free_space": 0,
                "sdrs_enabled": false,
                "automation_level": "manual",
                "keep_vmdks_together": false,
                "load_balance_interval": 480,
                "io_load_balance_enabled": false
            }"#,
        )
        .unwrap();
        assert!(detail.datastores.is_empty());
    }

    #[test]
    fn test_datastore_detail_type_field() {
        let detail: DatastoreDetail = serde_json::from_str(
            r#"{"name": "ds_01", "type": "VMFS", "capacity": 100, "free_space": 40}"#,
        )
        .unwrap();
        assert_eq!(detail.datastore_type, "VMFS");
    }
}
