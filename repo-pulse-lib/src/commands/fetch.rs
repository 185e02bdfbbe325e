use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::collector::Assemble;
use chrono::Utc;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Print the payload on a single line instead of pretty-printing it
    #[arg(long)]
    pub compact: bool,
}

/// Assemble one payload and print it as JSON.
pub async fn fetch_stats<H: Host>(host: &mut H, common: &CommonArgs, args: &FetchArgs) -> Result<()> {
    let config = common.prepare()?;
    let collector = common.collector(&config)?;

    let payload = collector.assemble(Utc::now()).await?;

    let json = if args.compact {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .into_app_err("serializing payload")?;

    writeln!(host.output(), "{json}").into_app_err("writing payload")
}
