//! Option values understood by the volume driver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::VmwareError;

/// Disk adapter used when attaching volumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AdapterType {
    #[default]
    LsiLogic,
    BusLogic,
    LsiLogicSas,
    ParaVirtual,
    Ide,
}

impl AdapterType {
    pub const ALL: [AdapterType; 5] = [
        Self::LsiLogic,
        Self::BusLogic,
        Self::LsiLogicSas,
        Self::ParaVirtual,
        Self::Ide,
    ];

    /// Name used by the vSphere API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LsiLogic => "lsiLogic",
            Self::BusLogic => "busLogic",
            Self::LsiLogicSas => "lsiLogicsas",
            Self::ParaVirtual => "paraVirtual",
            Self::Ide => "ide",
        }
    }
}

impl fmt::Display for AdapterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdapterType {
    type Err = VmwareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|adapter| adapter.as_str() == s)
            .ok_or_else(|| VmwareError::InvalidAdapterType {
                invalid_type: s.to_string(),
            })
    }
}

impl TryFrom<String> for AdapterType {
    type Error = VmwareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AdapterType> for String {
    fn from(adapter: AdapterType) -> Self {
        adapter.as_str().to_string()
    }
}

/// How volume snapshots are stored in vCenter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotFormat {
    #[default]
    #[serde(rename = "template")]
    Template,
    #[serde(rename = "COW")]
    Cow,
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("template"),
            Self::Cow => f.write_str("COW"),
        }
    }
}

/// Strategy for picking the datastore backing a new volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatastoreSelection {
    /// The single best datastore (most connected hosts, most free space).
    Best,
    /// A random pick among the best datastores, optionally limited to the
    /// top `range` after sorting.
    RandomBest { range: Option<u32> },
}
