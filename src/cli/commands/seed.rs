//! Demo data command.

use console::style;

use crate::config::Settings;
use crate::services::seed_demo_data;

/// Insert the demo catalogue.
pub async fn cmd_seed(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let summary = seed_demo_data(&ctx).await?;

    if summary.artworks_inserted == 0 {
        println!(
            "{} Demo data already present ({} periods)",
            style("!").yellow(),
            summary.periods
        );
    } else {
        println!(
            "{} Seeded {} periods and {} artworks",
            style("✓").green(),
            summary.periods,
            summary.artworks_inserted
        );
    }

    Ok(())
}
