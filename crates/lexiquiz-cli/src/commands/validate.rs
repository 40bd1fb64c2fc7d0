//! The `lexiquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexiquiz_core::config::load_config_from;
use lexiquiz_core::parser::{parse_word_table, validate_word_table};
use lexiquiz_core::repository::WordRepository;

pub fn execute(words: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let path = super::resolve_word_list(words, config.word_list.as_deref())?;

    let table = parse_word_table(&path, &config.table)?;
    let warnings = validate_word_table(&table);

    println!(
        "Word list: {} ({} words, {} dropped)",
        path.display(),
        table.records.len(),
        table.dropped.len()
    );

    let repository = WordRepository::from_records(table.records);
    let categories = repository.categories();
    if !categories.is_empty() {
        let mut summary = Table::new();
        summary.set_header(vec!["Category", "Words"]);
        for (category, count) in &categories {
            summary.add_row(vec![Cell::new(category), Cell::new(count)]);
        }
        println!("{summary}");
    }

    for w in &warnings {
        let prefix = w
            .line
            .map(|line| format!("  [line {line}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Word list valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
