//! Command line definition.
//!
//! Kept in the library so the man page generator can render it.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::logging::LogLevel;

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("VMWARETOOL_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("VMWARETOOL_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(
    name = "vmwaretool",
    version,
    long_version = LONG_VERSION,
    about = "VMware vCenter volume helper",
    long_about = "VMware vCenter volume helper.\n\n\
        Reads the vCenter connection and volume driver options from a TOML \
        config file and reports progress on a shared terminal status line."
)]
pub struct Cli {
    /// Turn off the animated status line
    #[arg(long)]
    pub disable_spinner: bool,

    /// Config file [default: ~/.config/vmwaretool/vmwaretool.conf]
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Debug)]
    pub loglevel: LogLevel,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}
