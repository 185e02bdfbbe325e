use super::Host;
use super::config::Config;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `--config`, then `repo-pulse.toml`)
    #[arg(value_name = "PATH")]
    pub path: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, base_dir: &Utf8Path, path: Option<&Utf8Path>) {
    match Config::load(base_dir, path) {
        Ok(config) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = path {
                let _ = writeln!(host.output(), "Config file: {path}");
            }
            let _ = writeln!(
                host.output(),
                "Reporting on '{}', '{}' and package '{}'",
                config.primary_repo,
                config.secondary_repo,
                config.package
            );
        }
        Err(e) => {
            let _ = writeln!(host.error(), "Configuration validation failed: {e:#}");
            host.exit(1);
        }
    }
}
