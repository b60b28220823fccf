//! Context Resolver
//!
//! Resolves the inventory container that scopes a gathering run: either a
//! datacenter (whose datastore folder becomes the context) or an explicit
//! inventory folder path. Pure lookups, no side effects; an unresolvable
//! scope aborts the whole run.

use crate::config::QueryParams;
use crate::domain::ports::{DatacenterRef, FolderRef, InventoryProvider};
use crate::error::{Error, Result};
use tracing::info;

// =============================================================================
// Resolution Context
// =============================================================================

/// Inventory container used to scope the search
///
/// Ephemeral; exists only for the duration of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionContext {
    /// Scoped to a datacenter's datastore folder
    Datacenter(DatacenterRef),
    /// Scoped to an explicit inventory folder
    Folder(FolderRef),
}

// =============================================================================
// Context Resolver
// =============================================================================

/// Resolves `(datacenter_name | folder)` to a [`ResolutionContext`]
pub struct ContextResolver<'a> {
    provider: &'a dyn InventoryProvider,
}

impl<'a> ContextResolver<'a> {
    pub fn new(provider: &'a dyn InventoryProvider) -> Self {
        Self { provider }
    }

    /// Resolve the scope from validated query parameters
    ///
    /// Exactly one of `folder` / `datacenter_name` is present (enforced by
    /// [`QueryParams::validate`]). Folder takes the path lookup; datacenter
    /// takes the by-name lookup.
    pub async fn resolve(&self, params: &QueryParams) -> Result<ResolutionContext> {
        if let Some(path) = params.folder.as_deref() {
            let folder = self
                .provider
                .find_folder_by_path(path)
                .await?
                .ok_or_else(|| Error::FolderNotFound { path: path.to_string() })?;
            info!("Resolved folder '{}' to {}", path, folder.id);
            return Ok(ResolutionContext::Folder(folder));
        }

        // validate() guarantees datacenter_name is present here
        let name = params.datacenter_name.as_deref().unwrap_or_default();
        let datacenter = self
            .provider
            .find_datacenter_by_name(name)
            .await?
            .ok_or_else(|| Error::DatacenterNotFound { name: name.to_string() })?;
        info!("Resolved datacenter '{}' to {}", name, datacenter.id);
        Ok(ResolutionContext::Datacenter(datacenter))
    }
}
