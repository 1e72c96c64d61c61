//! Fixed-column text rendering of browser views.
//!
//! ```text
//! ID   Name                   Status
//! 3    Ruwan Bandara          ✗ Suspended
//! Page 1 of 1 · 4 of 10 records
//! ```

use crate::badge::{Badge, RowActions};
use crate::browser::View;
use crate::calc::{format_amount, InvoiceTotals, LineItem, RatingSummary};
use crate::pager::Position;
use crate::record::Record;

/// Shown in place of a table when nothing matches.
pub const NO_DATA: &str = "No records found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Field,
    Badge,
    Actions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
    pub width: usize,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn field(header: &'static str, field: &'static str, width: usize) -> Self {
        Self {
            header,
            field,
            width,
            kind: ColumnKind::Field,
        }
    }

    pub const fn badge(header: &'static str, width: usize) -> Self {
        Self {
            header,
            field: "status",
            width,
            kind: ColumnKind::Badge,
        }
    }

    pub const fn actions(width: usize) -> Self {
        Self {
            header: "Actions",
            field: "",
            width,
            kind: ColumnKind::Actions,
        }
    }
}

pub fn format_badge(badge: &Badge<'_>) -> String {
    format!("{} {}", badge.tone.marker(), badge.label)
}

pub fn format_actions(actions: &RowActions) -> String {
    actions.labels().join(" | ")
}

/// Cell texts for one record, unpadded.
pub fn row_cells<R: Record>(record: &R, columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .map(|column| match column.kind {
            ColumnKind::Field => record
                .field(column.field)
                .map(|value| value.display().into_owned())
                .unwrap_or_else(|| "-".to_string()),
            ColumnKind::Badge => format_badge(&record.badge()),
            ColumnKind::Actions => format_actions(&record.actions()),
        })
        .collect()
}

/// Truncate to `width` characters (ending in `…`) and pad to width.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width && width > 0 {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        format!("{:<width$}", text, width = width)
    }
}

fn join_row(cells: &[String], columns: &[Column]) -> String {
    cells
        .iter()
        .zip(columns)
        .map(|(cell, column)| fit(cell, column.width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn format_position(position: &Position, matched: usize, total: usize) -> String {
    match *position {
        Position::Page {
            page,
            page_count,
            has_prev,
            has_next,
        } => {
            let mut line = format!(
                "Page {} of {} · {} of {} records",
                page, page_count, matched, total
            );
            if has_prev {
                line.push_str("  [prev]");
            }
            if has_next {
                line.push_str("  [next]");
            }
            line
        }
        Position::Reveal { shown, has_more } => {
            let mut line = format!("Showing {} of {} matching ({} total)", shown, matched, total);
            if has_more {
                line.push_str("  [more]");
            }
            line
        }
    }
}

/// Render a view as header, rows and a paging footer, or the no-data line.
pub fn render_view<R: Record>(view: &View<'_, R>, columns: &[Column]) -> String {
    if view.is_empty() {
        return NO_DATA.to_string();
    }

    let header: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
    let mut lines = vec![join_row(&header, columns)];
    let rule_width: usize = columns.iter().map(|c| c.width).sum::<usize>() + 2 * columns.len().saturating_sub(1);
    lines.push("─".repeat(rule_width));
    for record in &view.rows {
        lines.push(join_row(&row_cells(*record, columns), columns));
    }
    lines.push(format_position(&view.position, view.matched, view.total));
    lines.join("\n")
}

/// Single-record detail listing used by the View action.
pub fn render_detail<R: Record>(record: &R, columns: &[Column]) -> String {
    let label_width = columns.iter().map(|c| c.header.len()).max().unwrap_or(0);
    columns
        .iter()
        .zip(row_cells(record, columns))
        .filter(|(column, _)| column.kind != ColumnKind::Actions)
        .map(|(column, cell)| format!("{:<width$}  {}", column.header, cell, width = label_width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Star strip, average and per-star breakdown, five stars first.
pub fn render_ratings(summary: &RatingSummary) -> String {
    let mut lines = vec![format!(
        "{}  {:.1} ({} reviews)",
        summary.stars(),
        summary.average,
        summary.count
    )];
    for star in (1..=5u8).rev() {
        lines.push(format!(
            "{} star  {:>4}  {:>5.1}%",
            star,
            summary.distribution[star as usize - 1],
            summary.percent(star)
        ));
    }
    lines.join("\n")
}

/// Line items followed by the subtotal, discount, tax and total rows.
pub fn render_invoice(items: &[LineItem], totals: &InvoiceTotals) -> String {
    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            format!(
                "{}  {:>4} x {:>10}  {:>12}",
                fit(&item.description, 24),
                item.quantity,
                format_amount(item.unit_price),
                format_amount(item.total())
            )
        })
        .collect();
    lines.push("─".repeat(58));
    let summary = [
        ("Subtotal", format_amount(totals.subtotal)),
        ("Discount", format!("-{}", format_amount(totals.discount))),
        ("Tax", format_amount(totals.tax)),
        ("Total", format_amount(totals.total)),
    ];
    for (label, amount) in summary {
        lines.push(format!("{:<44}{:>14}", label, amount));
    }
    lines.join("\n")
}
