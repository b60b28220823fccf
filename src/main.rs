//! vSphere Datastore-Cluster Inventory Collector
//!
//! Authenticates against a vCenter server, resolves the datacenter or
//! folder scope, gathers matching datastore clusters, and prints the
//! report as JSON on stdout. Lookup and validation failures exit
//! non-zero with a descriptive message.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsphere_dscluster_info::{
    ConnectionConfig, ConnectionFile, DatastoreClusterGatherer, QueryParams, Result,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Gather datastore-cluster (Storage DRS pod) inventory from VMware vCenter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// vCenter hostname or address
    #[arg(long, env = "VSPHERE_HOST")]
    hostname: Option<String>,

    /// vCenter username
    #[arg(long, env = "VSPHERE_USER")]
    username: Option<String>,

    /// vCenter password
    #[arg(long, env = "VSPHERE_PASSWORD")]
    password: Option<String>,

    /// vCenter HTTPS port
    #[arg(long, env = "VSPHERE_PORT")]
    port: Option<u16>,

    /// Verify the vCenter TLS certificate
    #[arg(long, env = "VSPHERE_VALIDATE_CERTS")]
    validate_certs: Option<bool>,

    /// YAML file with connection settings (flags and env override it)
    #[arg(long, env = "VSPHERE_CONFIG")]
    config: Option<PathBuf>,

    /// Name of the datacenter scoping the search
    /// (mutually exclusive with --folder)
    #[arg(long, visible_alias = "datacenter")]
    datacenter_name: Option<String>,

    /// Name of a single datastore cluster to gather
    #[arg(long)]
    datastore_cluster_name: Option<String>,

    /// Absolute inventory folder path scoping the search,
    /// e.g. /datacenter1/datastore/folder1 (mutually exclusive with
    /// --datacenter-name)
    #[arg(long)]
    folder: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

impl Args {
    fn connection(&self) -> Result<ConnectionConfig> {
        let file = match &self.config {
            Some(path) => ConnectionFile::load(path)?,
            None => ConnectionFile::default(),
        };
        file.resolve(
            self.hostname.clone(),
            self.username.clone(),
            self.password.clone(),
            self.port,
            self.validate_certs,
        )
    }

    fn query(&self) -> QueryParams {
        QueryParams {
            datacenter_name: self.datacenter_name.clone(),
            datastore_cluster_name: self.datastore_cluster_name.clone(),
            folder: self.folder.clone(),
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let params = args.query();
    params.validate()?;
    let connection = args.connection()?;

    info!("Gathering datastore-cluster inventory from {}", connection.hostname);

    let client = vsphere_dscluster_info::vsphere::connect(&connection).await?;
    let provider = Arc::new(client);

    let result = DatastoreClusterGatherer::new(provider.clone(), params)
        .gather()
        .await;

    // Session release is best effort regardless of the gather outcome
    provider.close().await;

    let report = result?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap())
        .add_directive("rustls=warn".parse().unwrap());

    // Logs go to stderr so stdout stays a clean JSON document
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
