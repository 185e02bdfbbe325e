//! Command dispatch logic for repo-pulse

use super::common::CommonArgs;
use super::{FetchArgs, InitArgs, ServeArgs, ValidateArgs, fetch_stats, init_config, serve_stats, validate_config};
use crate::{Host, Result};
use camino::Utf8Path;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "repo-pulse", version, long_about = None)]
#[command(about = "Serve aggregated GitHub and npm statistics for a project")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: PulseSubcommand,
}

#[derive(Subcommand, Debug)]
enum PulseSubcommand {
    /// Serve the statistics payload over HTTP
    Serve(ServeArgs),
    /// Assemble the statistics payload once and print it
    Fetch(FetchArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        PulseSubcommand::Serve(serve_args) => serve_stats(&cli.common, serve_args).await,
        PulseSubcommand::Fetch(fetch_args) => fetch_stats(host, &cli.common, fetch_args).await,
        PulseSubcommand::Init(init_args) => init_config(host, init_args),
        PulseSubcommand::Validate(validate_args) => {
            validate_config(
                host,
                Utf8Path::new("."),
                validate_args.path.as_deref().or(cli.common.config.as_deref()),
            );
            Ok(())
        }
    }
}
