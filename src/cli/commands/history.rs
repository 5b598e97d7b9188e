//! Extraction history command.

use console::style;

use crate::config::Settings;

/// Print the extraction audit log, newest first.
pub async fn cmd_history(settings: &Settings, limit: Option<i64>) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    let records = ctx.history().list(limit).await?;

    if records.is_empty() {
        println!("{} No extractions recorded yet", style("!").yellow());
        return Ok(());
    }

    println!("\n{}", style("Extraction History").bold());
    println!("{}", "-".repeat(60));
    println!("{:<6} {:<20} Filename", "ID", "When");
    println!("{}", "-".repeat(60));

    for record in records {
        println!(
            "{:<6} {:<20} {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.filename
        );
    }

    Ok(())
}
