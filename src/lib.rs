//! vmwaretool - VMware vCenter volume helper
//!
//! The interesting part is the terminal status display: several
//! concurrent operations share one animated status line through
//! [`indicator::Multiplexer`] without interleaving their output.

pub mod cli;
pub mod color;
pub mod config;
pub mod indicator;
pub mod logging;
pub mod vmware;

pub use config::Config;
