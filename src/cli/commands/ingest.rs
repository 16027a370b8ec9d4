//! Ingest command handler

use crate::config::Config;
use crate::domain::TitleId;
use crate::state::SharedState;

pub async fn cmd_ingest(config: Config, title_id: i32) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    println!("Importing seasons for title {title_id}...");
    let report = state
        .ingest_service
        .ingest_series(TitleId::new(title_id))
        .await?;

    println!(
        "✓ Stored {} seasons and {} episodes",
        report.seasons, report.episodes
    );
    Ok(())
}
