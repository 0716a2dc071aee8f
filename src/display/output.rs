use crate::analysis::table::SummaryTable;
use crate::error::AppError;
use colored::*;
use tabled::{builder::Builder, settings::Style};

use super::sink::TableSink;

/// Prints tables to stdout, optionally truncated to the first `limit` rows.
pub struct TerminalSink {
    limit: Option<usize>,
}

impl TerminalSink {
    pub fn new(limit: Option<usize>) -> Self {
        TerminalSink { limit }
    }
}

pub fn render_table(table: &SummaryTable, limit: Option<usize>) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in table.rows.iter().take(limit.unwrap_or(usize::MAX)) {
        builder.push_record(row.iter().cloned());
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    rendered.to_string()
}

impl TableSink for TerminalSink {
    fn write_table(&mut self, table: &SummaryTable) -> Result<(), AppError> {
        println!("\n{}", format!("📊 {}", table.title).bold().cyan());
        println!("{}\n", "=".repeat(60).cyan());

        if table.is_empty() {
            println!("{}", "No rows (not enough data)".yellow());
            return Ok(());
        }

        println!("{}", render_table(table, self.limit));
        if let Some(limit) = self.limit.filter(|l| *l < table.len()) {
            println!("{}", format!("… {} more rows", table.len() - limit).dimmed());
        }
        Ok(())
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}
