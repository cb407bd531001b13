//! Terminal table rendering for movie results.

use tmdbq_api::tmdb::Movie;

/// Number of rendered columns.
const COLUMNS: usize = 6;

/// Table column headers.
const HEADERS: [&str; COLUMNS] = [
    "#",
    "Original Title",
    "Release Date",
    "Title",
    "Average",
    "Votes",
];

/// Renders movies as a bordered table, one row per movie.
///
/// Rows are numbered from 1 in display order. An empty list renders a
/// friendly placeholder message instead of an empty table.
#[must_use]
pub fn format_results(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return String::from("No results available. Please try another query.");
    }

    let rows: Vec<[String; COLUMNS]> = movies
        .iter()
        .enumerate()
        .map(|(i, m)| {
            [
                i.saturating_add(1).to_string(),
                m.original_title.clone(),
                m.release_date.clone(),
                m.title.clone(),
                format!("{:.1}", m.vote_average),
                m.vote_count.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; COLUMNS] = [0; COLUMNS];
    for (width, header) in widths.iter_mut().zip(HEADERS) {
        *width = header.chars().count();
    }
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = separator_line(&widths);
    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&format_row(&HEADERS.map(String::from), &widths));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push_str(&separator);
    }
    out
}

/// Horizontal rule between rows, with `+` at column joints.
fn separator_line(widths: &[usize; COLUMNS]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width.saturating_add(2)));
        line.push('+');
    }
    line.push('\n');
    line
}

/// One padded, left-aligned table row.
fn format_row(cells: &[String; COLUMNS], widths: &[usize; COLUMNS]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(padding.saturating_add(1)));
        line.push('|');
    }
    line.push('\n');
    line
}
