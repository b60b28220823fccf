//! vSphere Datastore-Cluster Inventory Collector
//!
//! A read-only inventory tool that queries a VMware vCenter server for
//! datastore-cluster (Storage DRS pod) configuration and membership and
//! emits it as structured JSON for automation tooling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        CLI / Configuration                       │
//! │              (flags, env, optional YAML connection file)         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                    Datastore-Cluster Gatherer                    │
//! │  ┌───────────────┐  ┌────────────────────┐  ┌────────────────┐  │
//! │  │    Context    │  │      Cluster       │  │     Field      │  │
//! │  │    Resolver   │─▶│     Enumerator     │─▶│    Projector   │  │
//! │  └───────────────┘  └────────────────────┘  └────────────────┘  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                    Inventory Provider (port)                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                   vCenter REST Session/Client                    │
//! │         (Automation API, vmware-api-session-id token)            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`inventory`]: Gathering pass (resolve, enumerate, project)
//! - [`vsphere`]: vCenter REST session and inventory client
//! - [`domain`]: Inventory types and the provider port
//! - [`config`]: Connection and query configuration
//! - [`error`]: Error types and handling

pub mod config;
pub mod domain;
pub mod error;
pub mod inventory;
pub mod vsphere;

// Re-export commonly used types
pub use config::{ConnectionConfig, ConnectionFile, QueryParams};
pub use domain::ports::{
    DatacenterRef, DatastoreClusterSummary, DatastoreSummary, FolderRef, InventoryProvider,
    InventoryProviderRef, StorageDrsConfig,
};
pub use error::{Error, Result};
pub use inventory::{
    ClusterEnumerator, ContextResolver, DatastoreClusterGatherer, DatastoreClusterRecord,
    DatastoreRecord, GatherReport, QueryMode, ResolutionContext,
};
pub use vsphere::{RestInventoryClient, VsphereSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
