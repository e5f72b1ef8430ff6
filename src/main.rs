use clap::Parser;
use rankwatch::cli::Cli;
use rankwatch::client::feed::Feed;
use rankwatch::config::{Settings, LOCAL_SETTINGS_FILE};
use rankwatch::server::{serve, Watch};
use rankwatch::storage::FeedCache;

use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::load(&Cli::parse())?;

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(settings.get_trace_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if Settings::has_local_file() {
        info!("Found '{LOCAL_SETTINGS_FILE}' file, loaded local configuration.");
    }

    let feed = Feed::new(settings.reg_api_url.clone(), settings.service_timeout())?;
    let cache = FeedCache::new(Box::new(feed), settings.cache_ttl());
    let watch = Watch::new(settings.target_name.clone(), settings.target_form, cache)?;

    info!(
        "Watching '{}' in form {} (cache ttl {}s).",
        settings.target_name, settings.target_form, settings.cache_ttl_seconds
    );
    serve(&settings, Arc::new(watch)).await?;

    Ok(())
}
