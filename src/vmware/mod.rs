//! Seam to the external vCenter library.
//!
//! The session, inventory and disk handling belong to the backend behind
//! [`VmwareApi`]. This module only turns configuration into the parameters
//! the backend needs and wires the two calls together.

mod error;
mod types;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub use error::VmwareError;
pub use types::{AdapterType, DatastoreSelection, SnapshotFormat};

use crate::config::{VmwareConfig, MASK};

/// Extension key under which volumes are registered in vCenter.
pub const EXTENSION_KEY: &str = "org.openstack.storage";
/// Extension type tagged on managed volumes.
pub const EXTENSION_TYPE: &str = "volume";
/// Prefix for vCenter operation ids issued by this tool.
pub const OP_ID_PREFIX: &str = "c-vol";

/// Capability surface of a vCenter client library.
pub trait VmwareApi {
    type Session;
    type VolumeOps;

    fn create_session(&self, params: &SessionParams) -> Result<Self::Session, VmwareError>;

    fn volume_ops(
        &self,
        session: &Self::Session,
        max_objects: u32,
        extension_key: &str,
        extension_type: &str,
    ) -> Result<Self::VolumeOps, VmwareError>;
}

/// Certificate verification for the vCenter connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerification {
    /// Verify against the system trust store.
    System,
    /// Verify against a specific CA bundle.
    CaFile(PathBuf),
    /// Accept any certificate.
    Insecure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsOptions {
    pub verification: TlsVerification,
}

impl TlsOptions {
    /// A CA file always wins over `insecure`.
    pub fn new(ca_file: Option<&str>, insecure: bool) -> Self {
        let verification = match (ca_file, insecure) {
            (Some(ca_file), _) => TlsVerification::CaFile(PathBuf::from(ca_file)),
            (None, true) => TlsVerification::Insecure,
            (None, false) => TlsVerification::System,
        };
        Self { verification }
    }
}

/// Everything needed to open a vCenter session.
#[derive(Clone, PartialEq)]
pub struct SessionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub api_retry_count: u32,
    pub task_poll_interval: Duration,
    pub wsdl_location: Option<String>,
    pub tls: TlsOptions,
    pub pool_size: usize,
    pub op_id_prefix: &'static str,
}

impl SessionParams {
    pub fn from_config(config: &VmwareConfig) -> Result<Self, VmwareError> {
        let host = config
            .host_ip
            .clone()
            .ok_or(VmwareError::MissingOption { option: "host_ip" })?;
        let username = config
            .host_username
            .clone()
            .ok_or(VmwareError::MissingOption {
                option: "host_username",
            })?;

        let task_poll_interval = Duration::try_from_secs_f64(config.task_poll_interval)
            .map_err(|e| VmwareError::Driver(format!("invalid task_poll_interval: {}", e)))?;

        Ok(Self {
            host,
            port: config.host_port,
            username,
            password: config.host_password.clone().unwrap_or_default(),
            api_retry_count: config.api_retry_count,
            task_poll_interval,
            wsdl_location: config.wsdl_location.clone(),
            tls: TlsOptions::new(config.ca_file.as_deref(), config.insecure),
            pool_size: config.connection_pool_size,
            op_id_prefix: OP_ID_PREFIX,
        })
    }
}

impl fmt::Debug for SessionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &MASK)
            .field("api_retry_count", &self.api_retry_count)
            .field("task_poll_interval", &self.task_poll_interval)
            .field("wsdl_location", &self.wsdl_location)
            .field("tls", &self.tls)
            .field("pool_size", &self.pool_size)
            .field("op_id_prefix", &self.op_id_prefix)
            .finish()
    }
}

/// Open a session and the volume operations bound to it.
pub fn setup_connection<A: VmwareApi>(
    api: &A,
    config: &VmwareConfig,
) -> Result<(A::Session, A::VolumeOps), VmwareError> {
    let params = SessionParams::from_config(config)?;
    tracing::debug!(host = %params.host, port = params.port, "creating vCenter session");

    let session = api.create_session(&params)?;
    let ops = api.volume_ops(
        &session,
        config.max_objects_retrieval,
        EXTENSION_KEY,
        EXTENSION_TYPE,
    )?;
    Ok((session, ops))
}
