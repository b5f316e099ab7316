//! Configuration loading for vmwaretool.
//!
//! Options live in a TOML file with a `[vmware]` section for the vCenter
//! connection and volume driver, and a `[spinner]` section for the terminal
//! status display. Every key is optional; missing keys take their defaults.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::indicator::style;
use crate::vmware::{AdapterType, DatastoreSelection, SnapshotFormat};

/// Shown instead of secret option values.
pub const MASK: &str = "****";

const UNSET: &str = "<unset>";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vmware: VmwareConfig,
    pub spinner: SpinnerConfig,
}

/// vCenter connection and volume driver options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VmwareConfig {
    /// IP address or hostname of the vCenter server.
    pub host_ip: Option<String>,
    pub host_port: u16,
    pub host_username: Option<String>,
    pub host_password: Option<String>,
    /// Optional VIM service WSDL location, e.g. `http://<server>/vimService.wsdl`.
    pub wsdl_location: Option<String>,
    /// Number of times a VMware vCenter API call is retried.
    pub api_retry_count: u32,
    /// Interval in seconds between polls of remote tasks.
    pub task_poll_interval: f64,
    /// Folder in vCenter where volumes are created.
    pub volume_folder: String,
    pub image_transfer_timeout_secs: u64,
    /// Max number of objects returned per vCenter query.
    pub max_objects_retrieval: u32,
    /// Overrides the vCenter version reported by the server.
    pub host_version: Option<String>,
    /// Directory for temporary VMDK files during image transfer.
    pub tmp_dir: String,
    /// CA bundle used to verify the vCenter server certificate.
    pub ca_file: Option<String>,
    /// Skip certificate verification. Ignored when `ca_file` is set.
    pub insecure: bool,
    /// Compute clusters used for volume placement.
    pub cluster_name: Vec<String>,
    /// Storage profile names allowed for volume placement.
    pub storage_profile: Vec<String>,
    pub connection_pool_size: usize,
    pub adapter_type: AdapterType,
    pub snapshot_format: SnapshotFormat,
    /// Create the backing disk only when a volume is first attached.
    pub lazy_create: bool,
    /// Only datastores whose name matches are used for placement.
    pub datastore_regex: Option<String>,
    pub online_resize: bool,
    pub profile_check_on_attach: bool,
    pub select_random_best_datastore: bool,
    /// Limit the random pick to the top N datastores.
    pub random_datastore_range: Option<u32>,
}

impl Default for VmwareConfig {
    fn default() -> Self {
        Self {
            host_ip: None,
            host_port: 443,
            host_username: None,
            host_password: None,
            wsdl_location: None,
            api_retry_count: 10,
            task_poll_interval: 2.0,
            volume_folder: "Volumes".to_string(),
            image_transfer_timeout_secs: 7200,
            max_objects_retrieval: 100,
            host_version: None,
            tmp_dir: "/tmp".to_string(),
            ca_file: None,
            insecure: false,
            cluster_name: Vec::new(),
            storage_profile: Vec::new(),
            connection_pool_size: 10,
            adapter_type: AdapterType::default(),
            snapshot_format: SnapshotFormat::default(),
            lazy_create: true,
            datastore_regex: None,
            online_resize: true,
            profile_check_on_attach: true,
            select_random_best_datastore: false,
            random_datastore_range: None,
        }
    }
}

impl VmwareConfig {
    /// Compiled `datastore_regex`, if set.
    pub fn datastore_regex(&self) -> Result<Option<Regex>> {
        self.datastore_regex
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("invalid vmware.datastore_regex: {}", pattern))
            })
            .transpose()
    }

    pub fn datastore_selection(&self) -> DatastoreSelection {
        if self.select_random_best_datastore {
            DatastoreSelection::RandomBest {
                range: self.random_datastore_range,
            }
        } else {
            DatastoreSelection::Best
        }
    }

    fn validate(&self) -> Result<()> {
        self.datastore_regex()?;
        if self.random_datastore_range == Some(0) {
            bail!("vmware.random_datastore_range must be at least 1");
        }
        if self.connection_pool_size == 0 {
            bail!("vmware.connection_pool_size must be at least 1");
        }
        if !self.task_poll_interval.is_finite() || self.task_poll_interval <= 0.0 {
            bail!(
                "vmware.task_poll_interval must be a positive number of seconds, got {}",
                self.task_poll_interval
            );
        }
        Ok(())
    }

    fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("adapter_type", self.adapter_type.to_string()),
            ("api_retry_count", self.api_retry_count.to_string()),
            ("ca_file", optional(&self.ca_file)),
            ("cluster_name", list(&self.cluster_name)),
            ("connection_pool_size", self.connection_pool_size.to_string()),
            ("datastore_regex", optional(&self.datastore_regex)),
            ("host_ip", optional(&self.host_ip)),
            (
                "host_password",
                self.host_password
                    .as_ref()
                    .map_or_else(|| UNSET.to_string(), |_| MASK.to_string()),
            ),
            ("host_port", self.host_port.to_string()),
            ("host_username", optional(&self.host_username)),
            ("host_version", optional(&self.host_version)),
            (
                "image_transfer_timeout_secs",
                self.image_transfer_timeout_secs.to_string(),
            ),
            ("insecure", self.insecure.to_string()),
            ("lazy_create", self.lazy_create.to_string()),
            ("max_objects_retrieval", self.max_objects_retrieval.to_string()),
            ("online_resize", self.online_resize.to_string()),
            (
                "profile_check_on_attach",
                self.profile_check_on_attach.to_string(),
            ),
            ("random_datastore_range", optional(&self.random_datastore_range)),
            (
                "select_random_best_datastore",
                self.select_random_best_datastore.to_string(),
            ),
            ("snapshot_format", self.snapshot_format.to_string()),
            ("storage_profile", list(&self.storage_profile)),
            ("task_poll_interval", self.task_poll_interval.to_string()),
            ("tmp_dir", self.tmp_dir.clone()),
            ("volume_folder", self.volume_folder.clone()),
            ("wsdl_location", optional(&self.wsdl_location)),
        ]
    }
}

/// Terminal status display options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerConfig {
    /// Animate a status line while work runs.
    pub enabled: bool,
    /// Pick the animation at random from `styles` on every run.
    pub random: bool,
    /// Animation used when `random` is off.
    pub style: String,
    /// Candidates for the random pick. Every name must exist in the catalogue.
    pub styles: Vec<String>,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            random: true,
            style: style::DEFAULT_STYLE.to_string(),
            styles: style::DEFAULT_RANDOM_STYLES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SpinnerConfig {
    fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("enabled", self.enabled.to_string()),
            ("random", self.random.to_string()),
            ("style", self.style.clone()),
            ("styles", list(&self.styles)),
        ]
    }
}

impl Config {
    /// Default config file location: `~/.config/vmwaretool/vmwaretool.conf`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("vmwaretool").join("vmwaretool.conf"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// A missing default file is not an error: defaults are used and a
    /// warning is logged. A missing file that was asked for explicitly is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(&Self::default_path()?, false),
        }
    }

    /// Load from `path`. With `required` unset a missing file yields defaults.
    pub fn load_from(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() {
            if required {
                bail!("Config file not found: {}", path.display());
            }
            tracing::warn!("config not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to load {}", path.display()))?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML config content.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vmware.validate()
    }

    /// Every effective option as `section.key = value`, sorted by key
    /// within each section. Secrets are masked.
    pub fn option_values(&self) -> Vec<String> {
        let vmware = self
            .vmware
            .entries()
            .into_iter()
            .map(|(key, value)| format!("vmware.{} = {}", key, value));
        let spinner = self
            .spinner
            .entries()
            .into_iter()
            .map(|(key, value)| format!("spinner.{} = {}", key, value));
        spinner.chain(vmware).collect()
    }

    /// Log every effective option at `level`.
    pub fn log_values(&self, level: tracing::Level) {
        for line in self.option_values() {
            match level {
                tracing::Level::ERROR => tracing::error!("{}", line),
                tracing::Level::WARN => tracing::warn!("{}", line),
                tracing::Level::INFO => tracing::info!("{}", line),
                tracing::Level::DEBUG => tracing::debug!("{}", line),
                tracing::Level::TRACE => tracing::trace!("{}", line),
            }
        }
    }
}

fn optional<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| UNSET.to_string(), |v| v.to_string())
}

fn list(values: &[String]) -> String {
    format!("{:?}", values)
}
