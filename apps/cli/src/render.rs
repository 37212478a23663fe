//! Plain-text rendering of the asset table and status line.

use chrono::{DateTime, Utc};
use coinboard_core::favorites::FavoriteEntry;
use coinboard_core::{DisplayAsset, ListStatus};
use coinboard_market_data::ChangeWindow;

const FAVORITE_MARK: &str = "★";
const NOT_FAVORITE_MARK: &str = "☆";
const PRICE_PREFIX: &str = "US$ ";

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), text)
}

/// One row per asset: favorite mark, name, price, then the three change
/// windows. Columns are sized to their widest cell.
pub fn render_table(assets: &[DisplayAsset]) -> String {
    let rows: Vec<[String; 5]> = assets
        .iter()
        .map(|asset| {
            [
                asset.name.clone(),
                format!("{}{}", PRICE_PREFIX, asset.price_display()),
                asset.change_display(ChangeWindow::OneHour),
                asset.change_display(ChangeWindow::TwentyFourHours),
                asset.change_display(ChangeWindow::SevenDays),
            ]
        })
        .collect();

    let header = [
        "Name",
        "Price",
        ChangeWindow::OneHour.label(),
        ChangeWindow::TwentyFourHours.label(),
        ChangeWindow::SevenDays.label(),
    ];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str("   ");
    out.push_str(&pad_right(header[0], widths[0]));
    for (i, title) in header.iter().enumerate().skip(1) {
        out.push_str("  ");
        out.push_str(&pad_left(title, widths[i]));
    }
    out.push('\n');

    for (asset, row) in assets.iter().zip(rows.iter()) {
        let mark = if asset.is_favorite {
            FAVORITE_MARK
        } else {
            NOT_FAVORITE_MARK
        };
        out.push_str(mark);
        out.push_str("  ");
        out.push_str(&pad_right(&row[0], widths[0]));
        for (i, cell) in row.iter().enumerate().skip(1) {
            out.push_str("  ");
            out.push_str(&pad_left(cell, widths[i]));
        }
        out.push('\n');
    }

    out
}

pub fn render_status(status: &ListStatus, refreshed_at: Option<DateTime<Utc>>) -> String {
    let updated = refreshed_at
        .map(|at| format!(" (updated {})", at.format("%H:%M:%S UTC")))
        .unwrap_or_default();

    match status {
        ListStatus::Loading => "Loading...".to_string(),
        ListStatus::Ready => format!("Ready{}", updated),
        ListStatus::Error {
            message,
            retryable,
            has_data,
        } => {
            let mut line = format!("Error: {}", message);
            if *has_data {
                line.push_str(&format!(" - showing last data{}", updated));
            }
            if *retryable {
                line.push_str(" - press /refresh to retry");
            }
            line
        }
    }
}

pub fn render_filter_line(filter: &str, shown: usize, total: usize) -> Option<String> {
    if filter.is_empty() {
        return None;
    }
    Some(format!(
        "Filter: \"{}\" ({} of {} assets)",
        filter, shown, total
    ))
}

pub fn render_favorites(entries: &[FavoriteEntry]) -> String {
    if entries.is_empty() {
        return "No favorites yet. Use /fav <id> to add one.".to_string();
    }

    let mut out = String::from("Favorites:\n");
    for entry in entries {
        match (&entry.name, &entry.symbol) {
            (Some(name), Some(symbol)) => {
                out.push_str(&format!("  {} {} ({})\n", FAVORITE_MARK, name, symbol.to_uppercase()))
            }
            (Some(name), None) => out.push_str(&format!("  {} {}\n", FAVORITE_MARK, name)),
            _ => out.push_str(&format!("  {} {}\n", FAVORITE_MARK, entry.id)),
        }
    }
    out
}
