//! Log level selection and subscriber setup.

use anyhow::Result;
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Log levels accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    #[default]
    Debug,
}

impl LogLevel {
    /// `tracing` has no level above ERROR, so CRITICAL shares it.
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Critical | Self::Error => tracing::Level::ERROR,
            Self::Warning => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
        }
    }

    fn directive(self) -> String {
        format!(
            "vmwaretool={}",
            self.as_tracing().as_str().to_ascii_lowercase()
        )
    }
}

/// Install the global subscriber writing to stderr.
///
/// `RUST_LOG` is honored; the chosen level is added for this crate's
/// targets on top of it. Calling this twice is harmless.
pub fn init(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.directive().parse()?);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}
