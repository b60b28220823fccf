//! vCenter Adapter
//!
//! REST-backed implementation of the inventory port: session handling
//! against the vCenter Automation API and the read-only lookups the
//! gatherer consumes.

pub mod client;
pub mod session;

pub use client::RestInventoryClient;
pub use session::VsphereSession;

use crate::config::ConnectionConfig;
use crate::error::Result;

/// Log in to vCenter and build the REST-backed inventory provider
pub async fn connect(config: &ConnectionConfig) -> Result<RestInventoryClient> {
    let session = VsphereSession::login(config).await?;
    Ok(RestInventoryClient::new(session))
}
