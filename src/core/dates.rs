//! Calendar helpers shared by the engine. All functions are pure apart from
//! [`today`] and [`generate_id`].

use chrono::{Datelike, Duration, Local, NaiveDate};
use uuid::Uuid;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const ID_LENGTH: usize = 12;

/// Current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local calendar day as `YYYY-MM-DD`.
pub fn today_iso() -> String {
    to_iso(today())
}

pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` date; blank or impossible dates yield `None`.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).ok()
}

/// Number of days (28-31) in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Day zero of the next month.
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(31)
}

/// True iff both ISO strings share their `YYYY-MM` prefix.
pub fn is_same_month(a: &str, b: &str) -> bool {
    match (a.get(..7), b.get(..7)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

/// Structural month comparison for parsed dates.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// All dates of the month containing `date`, in order.
pub fn month_days(date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let (year, month) = (date.year(), date.month());
    (1..=days_in_month(date)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
}

/// Short opaque identifier for new records.
pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

/// Generates an identifier not accepted by `taken`.
pub fn generate_unique_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let candidate = generate_id();
        if !taken(&candidate) {
            return candidate;
        }
    }
}
