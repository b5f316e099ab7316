//! Status indicator errors.

/// Errors that can occur while building or driving a status indicator.
#[derive(Debug, thiserror::Error)]
pub enum IndicatorError {
    #[error("Spinner style \"{name}\" missing from the style catalogue")]
    MissingStyle { name: String },

    #[error("No spinner styles configured")]
    NoStyles,

    #[error("Failed to write to terminal: {0}")]
    Io(#[from] std::io::Error),
}
