//! Document extraction command.

use std::path::Path;

use console::style;
use serde_json::Value;

use crate::config::Settings;
use crate::llm::ExtractionOptions;
use crate::services::{
    read_document, DocumentKind, ExtractionRequest, ExtractionService, SuggestedArtworks,
};

use super::helpers::truncate;

/// Extract artwork suggestions from a file and print them.
pub async fn cmd_extract(
    settings: &Settings,
    file: &Path,
    options: ExtractionOptions,
    json: bool,
) -> anyhow::Result<()> {
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = read_input(file, &filename)?;

    let ctx = settings.create_db_context();
    ctx.init_schema().await?;
    let service = ExtractionService::new(
        settings.keywords.clone(),
        settings.llm.clone(),
        ctx.history(),
    );

    let request = ExtractionRequest {
        text,
        options,
        filename: Some(filename).filter(|n| !n.is_empty()),
    };
    let artworks = service.extract(&request).await?;

    if json {
        let body = serde_json::json!({ "periods": [], "artworks": artworks });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_table(&artworks);
    Ok(())
}

/// `.docx` files are decoded; anything else is read as UTF-8 text.
fn read_input(file: &Path, filename: &str) -> anyhow::Result<String> {
    match DocumentKind::from_filename(filename) {
        Ok(_) => Ok(read_document(file, filename)?),
        Err(_) => std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file.display(), e)),
    }
}

fn print_table(artworks: &SuggestedArtworks) {
    if artworks.is_empty() {
        println!("{} No artworks found", style("!").yellow());
        return;
    }

    let source = if artworks.is_local() {
        "local parser"
    } else {
        "AI model"
    };
    println!(
        "\n{} {}",
        style("Suggested Artworks").bold(),
        style(format!("({})", source)).dim()
    );
    println!("{}", "-".repeat(80));
    println!("{:<8} {:<25} Title", "Year", "Artist");
    println!("{}", "-".repeat(80));

    let rows: Vec<(String, String, String)> = match artworks {
        SuggestedArtworks::Local(items) => items
            .iter()
            .map(|a| (a.year.to_string(), a.artist.clone(), a.title.clone()))
            .collect(),
        SuggestedArtworks::Remote(items) => items.iter().map(remote_row).collect(),
    };

    for (year, artist, title) in rows {
        println!(
            "{:<8} {:<25} {}",
            year,
            truncate(&artist, 24),
            truncate(&title, 45)
        );
    }

    println!("\n{} {} artworks", style("✓").green(), artworks.len());
}

/// Remote items are free-form; show whatever fields are present.
fn remote_row(item: &Value) -> (String, String, String) {
    let field = |key: &str| match item.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    (field("year"), field("artist"), field("title"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_input_plain_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "IMAGES:\n1. Exekias, Amphora\n").unwrap();
        let text = read_input(&path, "notes.txt").unwrap();
        assert!(text.starts_with("IMAGES:"));
    }

    #[test]
    fn test_remote_row_tolerates_odd_fields() {
        let row = remote_row(&serde_json::json!({ "title": "Kouros", "year": -530 }));
        assert_eq!(row, ("-530".to_string(), String::new(), "Kouros".to_string()));
    }
}
