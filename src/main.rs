//! vmwaretool CLI entry point

use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use vmwaretool::cli::Cli;
use vmwaretool::indicator::{style, Indicator, IndicatorBuilder, IndicatorExt};
use vmwaretool::{logging, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    logging::init(cli.loglevel)?;

    let config_path = match &cli.config_file {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    println!("config_file = {}", config_path.display());

    let config = Config::load_from(&config_path, cli.config_file.is_some())?;
    style::verify_styles(&config.spinner.styles).context("Invalid spinner configuration")?;
    if !config.spinner.random {
        style::lookup(&config.spinner.style).context("Invalid spinner configuration")?;
    }

    let disabled = cli.disable_spinner || !atty::is(atty::Stream::Stdout);
    let indicator = IndicatorBuilder::new(&config.spinner)
        .disabled(disabled)
        .text("Loading configuration")
        .build(&mut rand::thread_rng())?;

    {
        let _hidden = indicator.hidden();
        tracing::debug!(
            disable_spinner = cli.disable_spinner,
            loglevel = ?cli.loglevel,
            "command line options"
        );
        config.log_values(cli.loglevel.as_tracing());
    }
    indicator.stop();

    Ok(())
}
