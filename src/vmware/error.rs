//! Errors reported by the VMware driver layer.

/// Errors raised while talking to vCenter or interpreting its inventory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VmwareError {
    #[error("Invalid disk adapter type: {invalid_type}.")]
    InvalidAdapterType { invalid_type: String },

    #[error("Invalid disk type: {disk_type}.")]
    InvalidDiskType { disk_type: String },

    #[error("There is no virtual disk device.")]
    VirtualDiskNotFound,

    #[error("Storage profile: {storage_profile} not found.")]
    ProfileNotFound { storage_profile: String },

    #[error("There are no valid datastores.")]
    NoValidDatastore,

    #[error("Compute cluster: {cluster} not found.")]
    ClusterNotFound { cluster: String },

    #[error("There are no valid ESX hosts.")]
    NoValidHost,

    #[error("Template cannot be found at path: {path}.")]
    TemplateNotFound { path: String },

    #[error("Snapshot: {name} not found.")]
    SnapshotNotFound { name: String },

    #[error("Required option vmware.{option} is not set.")]
    MissingOption { option: &'static str },

    #[error("VMware driver error: {0}")]
    Driver(String),
}
