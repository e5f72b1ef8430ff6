use chrono::Utc;
use clap::Parser;
use rankwatch::cli::Cli;
use rankwatch::client::feed::Feed;
use rankwatch::config::{Settings, LOCAL_SETTINGS_FILE};
use rankwatch::core::templates::summary;
use rankwatch::snapshot::write_snapshot;
use std::path::Path;

use tracing::info;

// One live fetch, one write. Any failure aborts the run with a non-zero status.
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

    let feed = Feed::new(settings.reg_api_url.clone(), settings.snapshot_timeout())?;
    let result = write_snapshot(
        &feed,
        &settings.target_name,
        settings.target_form,
        Path::new(&settings.out_file),
        Utc::now(),
    )
    .await?;
    info!("{}", summary(&result)?);

    Ok(())
}
