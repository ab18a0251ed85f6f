//! Plain-text rendering of a [`DashboardView`].
//!
//! Charts are horizontal bars scaled so the largest value spans the configured
//! width. The preview is a `comfy-table` table.

use crate::summary::NOT_AVAILABLE;
use crate::view::DashboardView;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use imdb_processing::MovieRecord;

const BAR: char = '█';
const NO_DATA: &str = "  (no data)";

/// Render every section of the view.
pub fn render_text(view: &DashboardView, chart_width: usize) -> String {
    let mut sections = vec![header(view)];

    let top_rated: Vec<(String, f64, String)> = view
        .top_rated
        .iter()
        .map(|m| (m.title.clone(), m.imdb_rating, format!("{:.1}", m.imdb_rating)))
        .collect();
    sections.push(section("Top rated titles", &bar_chart(&top_rated, chart_width)));

    let decades: Vec<(String, f64, String)> = view
        .decades
        .iter()
        .map(|d| (format!("{}s", d.decade), d.count as f64, d.count.to_string()))
        .collect();
    sections.push(section("Titles per decade", &bar_chart(&decades, chart_width)));

    let revenue: Vec<(String, f64, String)> = view
        .revenue_by_genre
        .iter()
        .map(|g| (g.genre.clone(), g.mean_revenue, format_currency(g.mean_revenue)))
        .collect();
    sections.push(section("Mean revenue by genre", &bar_chart(&revenue, chart_width)));

    if !view.preview.is_empty() {
        sections.push(format!("Preview\n{}", preview_table(&view.preview)));
    }

    sections.push(format!("Findings\n{}", view.findings));
    sections.join("\n\n")
}

fn header(view: &DashboardView) -> String {
    format!(
        "IMDb Top 1000 | Genre: {} | {} titles",
        view.filter, view.record_count
    )
}

fn section(title: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        format!("{title}\n{NO_DATA}")
    } else {
        format!("{title}\n{}", lines.join("\n"))
    }
}

/// One line per `(label, value, value_label)` entry. Bars are proportional to
/// the largest value; any positive value gets at least one block.
pub fn bar_chart(entries: &[(String, f64, String)], width: usize) -> Vec<String> {
    let max = entries
        .iter()
        .map(|(_, value, _)| *value)
        .fold(0.0_f64, f64::max);
    let label_width = entries
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    entries
        .iter()
        .map(|(label, value, value_label)| {
            let blocks = if max > 0.0 && *value > 0.0 {
                ((value / max) * width as f64).round().max(1.0) as usize
            } else {
                0
            };
            let padding = label_width - label.chars().count();
            format!(
                "  {label}{} | {} {value_label}",
                " ".repeat(padding),
                BAR.to_string().repeat(blocks)
            )
        })
        .collect()
}

/// Whole dollars with thousands separators, e.g. `$133,414,000`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn preview_table(records: &[MovieRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Year", "Genre", "Rating", "Revenue"]);

    for record in records {
        table.add_row(vec![
            record.title.clone(),
            or_sentinel(record.year.map(|y| y.to_string())),
            or_sentinel(record.main_genre.clone()),
            format!("{:.1}", record.imdb_rating),
            or_sentinel(record.revenue.map(format_currency)),
        ]);
    }

    for index in [1, 3, 4] {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

fn or_sentinel(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
