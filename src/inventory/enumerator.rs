//! Cluster Enumerator
//!
//! Selects one of three mutually exclusive query modes from the supplied
//! parameters and retrieves the matching datastore-cluster objects from
//! the inventory. Datacenter scoping is a single-pass filter over the
//! inventory-wide enumeration (name equality with the parent datacenter),
//! never a persistent cache.

use crate::config::QueryParams;
use crate::domain::ports::{DatastoreClusterSummary, InventoryProvider};
use crate::error::{Error, Result};
use tracing::{debug, info};

// =============================================================================
// Query Mode
// =============================================================================

/// The three mutually exclusive ways a run selects clusters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// A single named datastore cluster
    ByName(String),
    /// All clusters whose parent datacenter has this name
    ByDatacenter(String),
    /// Every cluster in the inventory
    All,
}

impl QueryMode {
    /// Select the query mode from validated parameters
    ///
    /// Precedence: an explicit cluster name wins, then a datacenter scope;
    /// a folder-only invocation enumerates inventory-wide.
    pub fn from_params(params: &QueryParams) -> Self {
        if let Some(name) = &params.datastore_cluster_name {
            QueryMode::ByName(name.clone())
        } else if let Some(name) = &params.datacenter_name {
            QueryMode::ByDatacenter(name.clone())
        } else {
            QueryMode::All
        }
    }
}

impl std::fmt::Display for QueryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryMode::ByName(name) => write!(f, "cluster '{}'", name),
            QueryMode::ByDatacenter(name) => write!(f, "datacenter '{}'", name),
            QueryMode::All => write!(f, "all clusters"),
        }
    }
}

// =============================================================================
// Cluster Enumerator
// =============================================================================

/// Retrieves the ordered sequence of matched clusters for a query mode
pub struct ClusterEnumerator<'a> {
    provider: &'a dyn InventoryProvider,
}

impl<'a> ClusterEnumerator<'a> {
    pub fn new(provider: &'a dyn InventoryProvider) -> Self {
        Self { provider }
    }

    /// Enumerate matching clusters, in inventory order
    ///
    /// `ByName` fails with [`Error::ClusterNotFound`] when the cluster is
    /// absent; the scoped and unscoped modes may legitimately return an
    /// empty sequence.
    pub async fn enumerate(&self, mode: &QueryMode) -> Result<Vec<DatastoreClusterSummary>> {
        let clusters = match mode {
            QueryMode::ByName(name) => {
                let cluster = self
                    .provider
                    .find_datastore_cluster_by_name(name)
                    .await?
                    .ok_or_else(|| Error::ClusterNotFound { name: name.clone() })?;
                vec![cluster]
            }
            QueryMode::ByDatacenter(name) => {
                let all = self.provider.list_datastore_clusters().await?;
                debug!("Enumerated {} clusters inventory-wide", all.len());
                all.into_iter().filter(|c| c.datacenter == *name).collect()
            }
            QueryMode::All => self.provider.list_datastore_clusters().await?,
        };

        info!("Matched {} datastore cluster(s) for {}", clusters.len(), mode);
        Ok(clusters)
    }
}
