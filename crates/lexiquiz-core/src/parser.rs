//! Delimited word-table parser.
//!
//! Loads word lists from CSV-style files with a header row, maps the header
//! names to column roles, and validates the result.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::WordRecord;

/// Header names for each column role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    #[serde(default = "default_source_column")]
    pub source: String,
    #[serde(default = "default_target_column")]
    pub target: String,
    #[serde(default = "default_category_column")]
    pub category: String,
    #[serde(default = "default_example_column")]
    pub example: String,
}

fn default_source_column() -> String {
    "Romence Kelime".to_string()
}
fn default_target_column() -> String {
    "Türkçe Anlamı".to_string()
}
fn default_category_column() -> String {
    "Kelime Türü".to_string()
}
fn default_example_column() -> String {
    "Örnek Cümle".to_string()
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            source: default_source_column(),
            target: default_target_column(),
            category: default_category_column(),
            example: default_example_column(),
        }
    }
}

/// How a word table is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFormat {
    /// Field separator.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Header names for each column role.
    #[serde(default)]
    pub columns: ColumnMap,
}

fn default_delimiter() -> char {
    ','
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            columns: ColumnMap::default(),
        }
    }
}

/// A data row that was excluded from the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line on which the row starts.
    pub line: usize,
    pub reason: String,
}

/// Parsed records plus the rows that did not make it.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    pub records: Vec<WordRecord>,
    pub dropped: Vec<DroppedRow>,
}

/// A raw row together with the line it started on.
struct RawRow {
    line: usize,
    fields: Vec<String>,
}

/// Parse a word-table file.
pub fn parse_word_table(path: &Path, format: &TableFormat) -> Result<WordTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;

    parse_word_table_str(&content, format)
        .with_context(|| format!("failed to parse word list: {}", path.display()))
}

/// Parse word-table text (useful for testing).
pub fn parse_word_table_str(
    content: &str,
    format: &TableFormat,
) -> std::result::Result<WordTable, QuizError> {
    let mut rows = split_rows(content, format.delimiter)?.into_iter();

    let Some(header) = rows.next() else {
        return Ok(WordTable::default());
    };

    let find = |name: &str| -> std::result::Result<usize, QuizError> {
        header
            .fields
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| QuizError::MissingColumn {
                column: name.to_string(),
            })
    };
    let columns = &format.columns;
    let roles = [
        (find(&columns.source)?, columns.source.as_str()),
        (find(&columns.target)?, columns.target.as_str()),
        (find(&columns.category)?, columns.category.as_str()),
        (find(&columns.example)?, columns.example.as_str()),
    ];

    let mut table = WordTable::default();
    for row in rows {
        let mut values = Vec::with_capacity(roles.len());
        let mut missing = None;
        for (idx, name) in roles {
            match row.fields.get(idx).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => values.push(v.to_string()),
                _ => {
                    missing = Some(name);
                    break;
                }
            }
        }

        if let Some(name) = missing {
            tracing::debug!("dropping row on line {}: missing {}", row.line, name);
            table.dropped.push(DroppedRow {
                line: row.line,
                reason: format!("missing value for '{name}'"),
            });
            continue;
        }

        let mut values = values.into_iter();
        table.records.push(WordRecord {
            source_term: values.next().unwrap_or_default(),
            target_term: values.next().unwrap_or_default(),
            category: values.next().unwrap_or_default(),
            example_sentence: values.next().unwrap_or_default(),
        });
    }

    if !table.dropped.is_empty() {
        tracing::warn!(
            "dropped {} incomplete row(s) from word list",
            table.dropped.len()
        );
    }

    Ok(table)
}

/// Split delimited text into rows, honouring double-quoted fields.
///
/// Quoted fields may contain the delimiter, newlines, and `""` escapes.
/// Blank lines are skipped.
fn split_rows(content: &str, delimiter: char) -> std::result::Result<Vec<RawRow>, QuizError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut row_line = 1;
    let mut quote_line = 1;

    let mut finish_row = |fields: &mut Vec<String>, row_line: usize| {
        let blank = fields.len() == 1 && fields[0].trim().is_empty();
        let fields = std::mem::take(fields);
        if !blank {
            rows.push(RawRow {
                line: row_line,
                fields,
            });
        }
    };

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() && !quoted => {
                field.clear();
                in_quotes = true;
                quoted = true;
                quote_line = line;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
                finish_row(&mut fields, row_line);
                line += 1;
                row_line = line;
            }
            c if c == delimiter => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(QuizError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        finish_row(&mut fields, row_line);
    }

    Ok(rows)
}

/// A warning from word-table validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The source line (if applicable).
    pub line: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Minimum records per category for a round to show a full option set.
const FULL_ROUND_SIZE: usize = 4;

/// Validate a parsed word table for common issues.
pub fn validate_word_table(table: &WordTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for row in &table.dropped {
        warnings.push(ValidationWarning {
            line: Some(row.line),
            message: format!("row dropped: {}", row.reason),
        });
    }

    // Duplicate source terms make the review ambiguous
    let mut seen = HashSet::new();
    for record in &table.records {
        if !seen.insert(record.source_term.as_str()) {
            warnings.push(ValidationWarning {
                line: None,
                message: format!("duplicate source term: {}", record.source_term),
            });
        }
    }

    let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &table.records {
        *per_category.entry(record.category.as_str()).or_default() += 1;
    }
    for (category, count) in per_category {
        if count < FULL_ROUND_SIZE {
            warnings.push(ValidationWarning {
                line: None,
                message: format!(
                    "category '{category}' has only {count} word(s); its rounds will show fewer than {FULL_ROUND_SIZE} options"
                ),
            });
        }
    }

    if table.records.is_empty() {
        warnings.push(ValidationWarning {
            line: None,
            message: "word list contains no usable words".into(),
        });
    }

    warnings
}
