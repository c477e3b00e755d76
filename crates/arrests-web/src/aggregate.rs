//! Secondary aggregates derived from query results for the charts.

use std::collections::BTreeMap;

use arrests_core::model::{ArrestsByDate, Hotspot};
use chrono::Datelike;
use serde::Serialize;

/// A category's slice of a total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: i64,
    pub percent: f64,
}

/// Sum arrests by calendar month (1-12), across all years.
pub fn monthly_totals(rows: &[ArrestsByDate]) -> Vec<(u32, i64)> {
    let mut months: BTreeMap<u32, i64> = BTreeMap::new();
    for row in rows {
        *months.entry(row.date.month()).or_default() += row.count;
    }
    months.into_iter().collect()
}

/// Three-letter month name for a month number.
pub fn month_label(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name()[..3].to_string())
        .unwrap_or_else(|| month.to_string())
}

/// Sum hotspot arrests by borough, boroughs in the order they first appear.
pub fn borough_totals(rows: &[Hotspot]) -> Vec<(String, i64)> {
    let mut totals: Vec<(String, i64)> = Vec::new();
    for row in rows {
        match totals.iter_mut().find(|(borough, _)| *borough == row.borough) {
            Some((_, total)) => *total += row.count,
            None => totals.push((row.borough.clone(), row.count)),
        }
    }
    totals
}

/// Percentage of the total for each category. Empty when the total is zero.
pub fn shares<'a>(items: impl IntoIterator<Item = (&'a str, i64)>) -> Vec<Share> {
    let items: Vec<(&str, i64)> = items.into_iter().collect();
    let total: i64 = items.iter().map(|(_, count)| count).sum();
    if total <= 0 {
        return Vec::new();
    }
    items
        .into_iter()
        .map(|(label, count)| Share {
            label: label.to_string(),
            count,
            percent: count as f64 * 100.0 / total as f64,
        })
        .collect()
}
