//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use lexiquiz_core::config::LanguagePair;
use lexiquiz_core::report::{CategoryStats, SessionReport};

use crate::links::dictionary_link;

/// Presentation settings the report itself does not carry.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Dictionary lookup URL template with a `{slug}` placeholder.
    pub dictionary_url: String,
    pub languages: LanguagePair,
}

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a session report.
pub fn generate_html(report: &SessionReport, options: &RenderOptions) -> String {
    let (prompt_lang, answer_lang) = options.languages.for_direction(report.direction);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>lexiquiz report — {:.2}%</title>\n",
        report.score
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>lexiquiz report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} → {} | {} words | {}</p>\n",
        html_escape(prompt_lang),
        html_escape(answer_lang),
        report.total_rounds,
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Score</h2>\n");
    html.push_str(&format!(
        "<p class=\"score\">{:.2}%</p>\n<p>Correct: {} | Incorrect: {}</p>\n",
        report.score, report.correct_count, report.incorrect_count
    ));

    if !report.categories.is_empty() {
        html.push_str("<table class=\"summary\">\n");
        html.push_str(
            "<thead><tr><th>Category</th><th>Words</th><th>Correct</th><th>Score</th></tr></thead>\n",
        );
        html.push_str("<tbody>\n");
        for (category, stats) in &report.categories {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}%</td></tr>\n",
                html_escape(category),
                stats.total,
                stats.correct,
                stats.score,
            ));
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&generate_bar_chart(&report.categories));
    }
    html.push_str("</section>\n");

    // Answers in the order they were given
    html.push_str("<section class=\"rounds\">\n");
    html.push_str("<h2>Answers</h2>\n");
    html.push_str("<table>\n");
    html.push_str(&format!(
        "<thead><tr><th>#</th><th>{}</th><th>Your answer</th><th>Correct answer</th></tr></thead>\n",
        html_escape(prompt_lang)
    ));
    html.push_str("<tbody>\n");
    for (i, round) in report.rounds.iter().enumerate() {
        let class = if round.correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            i + 1,
            html_escape(&round.prompt),
            html_escape(&round.selected),
            html_escape(&round.correct_answer),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Review of every word in the session
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Words in this session</h2>\n");
    html.push_str("<table id=\"review\">\n");
    html.push_str(&format!(
        "<thead><tr><th onclick=\"sortTable(0)\">{}</th><th onclick=\"sortTable(1)\">{}</th><th>Example</th><th>Dictionary</th></tr></thead>\n",
        html_escape(prompt_lang),
        html_escape(answer_lang)
    ));
    html.push_str("<tbody>\n");
    for row in &report.review {
        let link = dictionary_link(&options.dictionary_url, &row.external_link_slug)
            .map(|url| {
                format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                    html_escape(&url),
                    html_escape(&row.external_link_slug)
                )
            })
            .unwrap_or_default();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&row.prompt),
            html_escape(&row.answer),
            html_escape(&row.example),
            link
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(
    report: &SessionReport,
    options: &RenderOptions,
    path: &Path,
) -> Result<()> {
    let html = generate_html(report, options);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(categories: &BTreeMap<String, CategoryStats>) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 160;

    let total_height = categories.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 70,
        total_height
    );

    for (i, (category, stats)) in categories.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (stats.score / 100.0 * max_width as f64) as usize;

        let color = if stats.score >= 80.0 {
            "#22c55e"
        } else if stats.score >= 50.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(category)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.2}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            stats.score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { font-size: 3rem; font-weight: bold; margin: 0.5rem 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
#review th[onclick] { cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('review');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
