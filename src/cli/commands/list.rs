//! List titles command handler

use crate::config::Config;
use crate::db::Store;
use crate::entities::TitleKind;

pub async fn cmd_list_titles(config: &Config, series_only: bool) -> anyhow::Result<()> {
    let store = Store::from_config(config).await?;

    let kinds: &[TitleKind] = if series_only {
        &[TitleKind::Series]
    } else {
        &[TitleKind::Movie, TitleKind::Series]
    };

    for kind in kinds {
        let titles = store.list_titles(*kind).await?;
        let heading = match kind {
            TitleKind::Movie => "Movies",
            TitleKind::Series => "Series",
        };

        println!("{heading} ({} total)", titles.len());
        println!("{:-<60}", "");

        for title in titles {
            let year = title.year.map(|y| y.to_string()).unwrap_or("?".to_string());
            match kind {
                TitleKind::Movie => println!("  [{}] {} ({year})", title.id, title.name),
                TitleKind::Series => println!(
                    "  [{}] {} ({year}) - {} seasons",
                    title.id, title.name, title.season_count
                ),
            }
        }
        println!();
    }

    Ok(())
}
