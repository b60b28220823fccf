//! Collector Configuration
//!
//! Connection settings for the vCenter session and the query parameters
//! that select which datastore clusters are gathered. Connection settings
//! may come from CLI flags, environment variables, or an optional YAML
//! file; explicit flags win over file values.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

// =============================================================================
// Connection Configuration
// =============================================================================

/// Connection settings for the vCenter session
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// vCenter hostname or address
    pub hostname: String,
    /// vCenter username
    pub username: String,
    /// vCenter password
    pub password: String,
    /// HTTPS port
    pub port: u16,
    /// Verify the TLS peer certificate
    pub validate_certs: bool,
}

impl ConnectionConfig {
    /// Base URL of the vCenter endpoint
    pub fn base_url(&self) -> String {
        if self.port == 443 {
            format!("https://{}", self.hostname)
        } else {
            format!("https://{}:{}", self.hostname, self.port)
        }
    }
}

// =============================================================================
// YAML Connection File
// =============================================================================

/// Connection settings as read from a YAML file
///
/// All fields are optional; anything missing must be supplied via CLI
/// flags or environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionFile {
    pub hostname: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub port: Option<u16>,
    pub validate_certs: Option<bool>,
}

impl ConnectionFile {
    /// Load connection settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: ConnectionFile = serde_yaml::from_str(&raw)?;
        debug!("Loaded connection settings from {}", path.display());
        Ok(file)
    }

    /// Merge file values under explicitly supplied settings
    ///
    /// `hostname`/`username`/`password` come from flags or env when present,
    /// otherwise from the file; missing required values fail validation.
    pub fn resolve(
        &self,
        hostname: Option<String>,
        username: Option<String>,
        password: Option<String>,
        port: Option<u16>,
        validate_certs: Option<bool>,
    ) -> Result<ConnectionConfig> {
        let hostname = hostname
            .or_else(|| self.hostname.clone())
            .ok_or_else(|| Error::Configuration("vCenter hostname is required".into()))?;
        let username = username
            .or_else(|| self.username.clone())
            .ok_or_else(|| Error::Configuration("vCenter username is required".into()))?;
        let password = password
            .or_else(|| self.password.clone())
            .ok_or_else(|| Error::Configuration("vCenter password is required".into()))?;

        Ok(ConnectionConfig {
            hostname,
            username,
            password,
            port: port.or(self.port).unwrap_or(443),
            validate_certs: validate_certs.or(self.validate_certs).unwrap_or(true),
        })
    }
}

// =============================================================================
// Query Parameters
// =============================================================================

/// Parameters selecting which datastore clusters are gathered
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Scope the search to a datacenter (mutually exclusive with `folder`)
    pub datacenter_name: Option<String>,
    /// Gather a single named datastore cluster
    pub datastore_cluster_name: Option<String>,
    /// Scope the search to an absolute inventory folder path
    /// (mutually exclusive with `datacenter_name`)
    pub folder: Option<String>,
}

impl QueryParams {
    /// Validate mutual exclusivity before any inventory call
    ///
    /// Exactly one of `datacenter_name` / `folder` must be supplied.
    pub fn validate(&self) -> Result<()> {
        match (&self.datacenter_name, &self.folder) {
            (Some(_), Some(_)) => Err(Error::Configuration(
                "parameters datacenter_name and folder are mutually exclusive".into(),
            )),
            (None, None) => Err(Error::Configuration(
                "one of the parameters datacenter_name or folder is required".into(),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn params(
        datacenter: Option<&str>,
        cluster: Option<&str>,
        folder: Option<&str>,
    ) -> QueryParams {
        QueryParams {
            datacenter_name: datacenter.map(String::from),
            datastore_cluster_name: cluster.map(String::from),
            folder: folder.map(String::from),
        }
    }

    #[test]
    fn test_validate_exactly_one_scope() {
        assert!(params(Some("DC1"), None, None).validate().is_ok());
        assert!(params(None, None, Some("/DC1/datastore")).validate().is_ok());
        assert!(params(Some("DC1"), Some("dsc1"), None).validate().is_ok());

        assert_matches!(
            params(Some("DC1"), None, Some("/DC1/datastore")).validate(),
            Err(Error::Configuration(_))
        );
        assert_matches!(params(None, None, None).validate(), Err(Error::Configuration(_)));
        assert_matches!(
            params(None, Some("dsc1"), None).validate(),
            Err(Error::Configuration(_))
        );
    }

    #[test]
    fn test_base_url_elides_default_port() {
        let config = ConnectionConfig {
            hostname: "vcenter.example.com".into(),
            username: "administrator@vsphere.local".into(),
            password: "secret".into(),
            port: 443,
            validate_certs: true,
        };
        assert_eq!(config.base_url(), "https://vcenter.example.com");

        let config = ConnectionConfig { port: 8443, ..config };
        assert_eq!(config.base_url(), "https://vcenter.example.com:8443");
    }

    #[test]
    fn test_connection_file_resolution() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "hostname: vcenter.example.com\nusername: admin\npassword: secret\nvalidate_certs: false"
        )
        .unwrap();

        let loaded = ConnectionFile::load(file.path()).unwrap();
        let config = loaded
            .resolve(None, Some("override@vsphere.local".into()), None, None, None)
            .unwrap();

        assert_eq!(config.hostname, "vcenter.example.com");
        // Explicit value wins over the file
        assert_eq!(config.username, "override@vsphere.local");
        assert_eq!(config.port, 443);
        assert!(!config.validate_certs);
    }

    #[test]
    fn test_connection_file_missing_required() {
        let file = ConnectionFile::default();
        let result = file.resolve(Some("vc.example.com".into()), None, None, None, None);
        assert_matches!(result, Err(Error::Configuration(_)));
    }

    #[test]
    fn test_connection_file_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hostname: vc\nproxy_host: proxy.example.com").unwrap();
        assert_matches!(
            ConnectionFile::load(file.path()),
            Err(Error::ConfigParse(_))
        );
    }
}
