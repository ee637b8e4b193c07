mod config;
use log::debug;

use std::{cmp::Ordering, collections::BTreeSet};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub mod builder;
pub mod manual;
pub mod parser;
pub mod view;

pub use crate::config::*;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Filters and sorts the full row set.
///
/// The rows are never modified: the result is a fresh copy, so calling this
/// twice with the same query gives the same sequence.
///
/// Arguments:
/// * `rows` the full row set, as loaded
/// * `query` the state of the search box, the dropdowns and the sort headers
/// * `now` the reference time for the date window
pub fn apply_query(
    rows: &[LeaderboardRow],
    query: &Query,
    now: DateTime<Utc>,
) -> Vec<LeaderboardRow> {
    let text = query.text.trim().to_lowercase();
    let max_days = query.date.max_days();

    let mut res: Vec<LeaderboardRow> = rows
        .iter()
        .filter(|r| match &query.model {
            ModelFilter::All => true,
            ModelFilter::Only(m) => r.model == *m,
        })
        .filter(|r| match max_days {
            None => true,
            Some(days) => age_in_days(&r.timestamp_utc, now) <= days,
        })
        .filter(|r| text.is_empty() || matches_text(r, &text))
        .cloned()
        .collect();

    // The sort must be stable: equal rows keep their relative order, which the
    // rank assignment relies on.
    res.sort_by(|a, b| {
        let ord = compare_rows(a, b, query.sort_key);
        match query.sort_dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        }
    });

    debug!(
        "apply_query: {:?} rows -> {:?} rows for query {:?}",
        rows.len(),
        res.len(),
        query
    );
    res
}

fn matches_text(row: &LeaderboardRow, lowercase_query: &str) -> bool {
    format!("{} {} {}", row.team, row.model, row.notes)
        .to_lowercase()
        .contains(lowercase_query)
}

/// Compares two rows on one column, in ascending order.
///
/// Scores compare as numbers, every other column as lower-cased text.
pub fn compare_rows(a: &LeaderboardRow, b: &LeaderboardRow, key: Column) -> Ordering {
    match key {
        Column::Score => parse_score(&a.score)
            .partial_cmp(&parse_score(&b.score))
            .unwrap_or(Ordering::Equal),
        _ => a
            .field(key)
            .to_lowercase()
            .cmp(&b.field(key).to_lowercase()),
    }
}

/// Assigns tied ranks to a sorted sequence.
///
/// Consecutive rows with the same score share a rank, which is the 1-based
/// position of the first row of the group (90, 90, 80 -> 1, 1, 3).
///
/// Only scores are looked at, whatever the order of the rows. When the rows are
/// sorted by another column, the ranks are not monotonic anymore: each change of
/// score between neighbours starts a new group.
pub fn assign_ranks(rows: Vec<LeaderboardRow>) -> Vec<RankedRow> {
    let mut res: Vec<RankedRow> = Vec::with_capacity(rows.len());
    let mut rank: usize = 1;
    let mut prev_score: Option<f64> = None;
    for (idx, row) in rows.into_iter().enumerate() {
        let score = parse_score(&row.score);
        if let Some(prev) = prev_score {
            if score != prev {
                rank = idx + 1;
            }
        }
        prev_score = Some(score);
        res.push(RankedRow { rank, row });
    }
    res
}

/// Reads a score as a number.
///
/// The longest numeric prefix is used (`"0.91 (public)"` reads as 0.91). Values
/// with no numeric prefix read as negative infinity, so that they end up last in
/// a descending sort.
pub fn parse_score(s: &str) -> f64 {
    match numeric_prefix(s.trim_start()).parse::<f64>() {
        Ok(x) if !x.is_nan() => x,
        _ => f64::NEG_INFINITY,
    }
}

fn numeric_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return &s[..i + "Infinity".len()];
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut num_digits = i - int_start;
    if i < b.len() && b[i] == b'.' {
        let mut k = i + 1;
        while k < b.len() && b[k].is_ascii_digit() {
            k += 1;
        }
        let frac_digits = k - (i + 1);
        if num_digits + frac_digits > 0 {
            num_digits += frac_digits;
            i = k;
        }
    }
    if num_digits == 0 {
        return "";
    }
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut k = i + 1;
        if k < b.len() && (b[k] == b'+' || b[k] == b'-') {
            k += 1;
        }
        let exp_start = k;
        while k < b.len() && b[k].is_ascii_digit() {
            k += 1;
        }
        if k > exp_start {
            i = k;
        }
    }
    &s[..i]
}

/// Reads an ISO-like timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// The age of a timestamp in (fractional) days.
///
/// Timestamps that cannot be read are infinitely old.
pub fn age_in_days(raw: &str, now: DateTime<Utc>) -> f64 {
    match parse_timestamp(raw) {
        Some(d) => (now - d).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => f64::INFINITY,
    }
}

/// The options of the model dropdown: the distinct non-empty models, sorted.
pub fn model_options(rows: &[LeaderboardRow]) -> Vec<String> {
    let models: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.model.as_str())
        .filter(|m| !m.is_empty())
        .collect();
    models.into_iter().map(|m| m.to_string()).collect()
}
