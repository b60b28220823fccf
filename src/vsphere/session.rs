//! vCenter REST Session
//!
//! Thin wrapper over the vCenter Automation API session protocol: a login
//! at start exchanges basic-auth credentials for a session token (sent on
//! every request as `vmware-api-session-id`), and a best-effort logout
//! releases the token at the end of the run. Responses arrive wrapped in
//! the `{"value": ...}` envelope.

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, warn};

const SESSION_PATH: &str = "/rest/com/vmware/cis/session";
const SESSION_HEADER: &str = "vmware-api-session-id";

/// Response envelope used by the vCenter Automation API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiValue<T> {
    pub value: T,
}

// =============================================================================
// Session
// =============================================================================

/// An authenticated vCenter REST session
///
/// One session is acquired per run and held for its duration; requests are
/// issued strictly sequentially.
pub struct VsphereSession {
    http: Client,
    base_url: String,
    token: String,
}

impl VsphereSession {
    /// Authenticate against vCenter and acquire a session token
    pub async fn login(config: &ConnectionConfig) -> Result<Self> {
        let http = Self::build_http_client(config.validate_certs)?;
        let base_url = config.base_url();
        let url = format!("{}{}", base_url, SESSION_PATH);

        let response = http
            .post(&url)
            .basic_auth(&config.username, Some(&config.password))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let body: ApiValue<String> = response.json().await?;
                info!("Authenticated to vCenter at {}", config.hostname);
                Ok(Self {
                    http,
                    base_url,
                    token: body.value,
                })
            }
            StatusCode::UNAUTHORIZED => Err(Error::Authentication {
                username: config.username.clone(),
            }),
            status => Err(Error::UnexpectedResponse {
                status: status.as_u16(),
                path: SESSION_PATH.to_string(),
            }),
        }
    }

    fn build_http_client(validate_certs: bool) -> Result<Client> {
        let mut builder = Client::builder().use_rustls_tls();
        if !validate_certs {
            warn!("TLS certificate validation is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(builder.build()?)
    }

    /// Issue a GET against an API path, unwrapping the `value` envelope
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} ({} filter(s))", path, query.len());

        let response = self
            .http
            .get(&url)
            .header(SESSION_HEADER, &self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedResponse {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body: ApiValue<T> = response.json().await?;
        Ok(body.value)
    }

    /// Release the session token; failures are logged, never propagated
    pub async fn logout(&self) {
        let url = format!("{}{}", self.base_url, SESSION_PATH);
        let result = self
            .http
            .delete(&url)
            .header(SESSION_HEADER, &self.token)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("vCenter session released");
            }
            Ok(response) => {
                warn!("vCenter logout returned {}", response.status());
            }
            Err(e) => {
                warn!("vCenter logout failed: {}", e);
            }
        }
    }
}
