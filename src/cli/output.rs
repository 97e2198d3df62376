//! Output formatting for CLI

use std::fmt::Write as _;

use crate::tictactoe::{BoardState, Cell};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a rate in [0, 1] as a percentage
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", 100.0 * rate)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Render a board as a grid. Empty cells show their 1-based position.
pub fn render_board(board: &BoardState) -> String {
    let separator = "+---+---+---+";
    let mut out = String::new();
    let cells = board.render();
    for (row, chunk) in cells.chunks(3).enumerate() {
        out.push_str(separator);
        out.push('\n');
        for (col, cell) in chunk.iter().enumerate() {
            let label = match cell {
                Cell::Empty => char::from_digit((row * 3 + col + 1) as u32, 10).unwrap_or(' '),
                other => other.to_char(),
            };
            let _ = write!(out, "| {label} ");
        }
        out.push_str("|\n");
    }
    out.push_str(separator);
    out
}
