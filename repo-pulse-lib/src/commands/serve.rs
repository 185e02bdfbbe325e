use super::common::CommonArgs;
use crate::Result;
use crate::cache::StatsCache;
use crate::server::{StatsService, serve};
use clap::Parser;
use ohno::IntoAppError;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `listen` from the configuration file)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,
}

pub async fn serve_stats(common: &CommonArgs, args: &ServeArgs) -> Result<()> {
    let config = common.prepare()?;
    let collector = common.collector(&config)?;

    let service = Arc::new(StatsService::new(collector, StatsCache::new(config.cache_ttl), config.cache_headers()));

    let addr = args.listen.as_deref().unwrap_or(&config.listen);
    let listener = TcpListener::bind(addr).await.into_app_err_with(|| format!("binding to '{addr}'"))?;

    serve(listener, service).await
}
