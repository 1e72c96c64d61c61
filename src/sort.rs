//! Sort menu entries and the comparators behind them.

use crate::record::{FieldValue, Record};
use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// How a field's values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Text,
    Date,
    Number,
}

/// One entry of an entity's sort menu, e.g. "Name (A-Z)".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub label: &'static str,
    pub field: &'static str,
    pub kind: SortKind,
    pub direction: SortDirection,
}

impl SortOption {
    pub const fn new(
        label: &'static str,
        field: &'static str,
        kind: SortKind,
        direction: SortDirection,
    ) -> Self {
        Self {
            label,
            field,
            kind,
            direction,
        }
    }

    pub const fn text_asc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Text, SortDirection::Ascending)
    }

    pub const fn text_desc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Text, SortDirection::Descending)
    }

    pub const fn date_asc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Date, SortDirection::Ascending)
    }

    pub const fn date_desc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Date, SortDirection::Descending)
    }

    pub const fn number_asc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Number, SortDirection::Ascending)
    }

    pub const fn number_desc(label: &'static str, field: &'static str) -> Self {
        Self::new(label, field, SortKind::Number, SortDirection::Descending)
    }

    /// Compare two records. Missing or unparseable values go last in
    /// either direction.
    pub fn compare<R: Record>(&self, a: &R, b: &R) -> Ordering {
        let a = a.field(self.field);
        let b = b.field(self.field);
        let ordering = match self.kind {
            SortKind::Text => compare_present(text_key(a), text_key(b), |x, y| locale_cmp(x, y)),
            SortKind::Date => compare_present(date_key(a), date_key(b), |x, y| x.cmp(y)),
            SortKind::Number => compare_present(number_key(a), number_key(b), |x, y| x.total_cmp(y)),
        };
        match ordering {
            Presence::Both(ord) if self.direction == SortDirection::Descending => ord.reverse(),
            Presence::Both(ord) | Presence::Partial(ord) => ord,
        }
    }
}

/// Find a menu entry by label, ignoring case and surrounding space.
pub fn find_option(menu: &'static [SortOption], label: &str) -> Option<&'static SortOption> {
    let label = label.trim();
    menu.iter().find(|option| option.label.eq_ignore_ascii_case(label))
}

/// Stable in-place sort; `None` keeps the current order.
pub fn sort_records<R: Record>(rows: &mut [&R], option: Option<&SortOption>) {
    if let Some(option) = option {
        rows.sort_by(|a, b| option.compare(*a, *b));
    }
}

/// Locale-style string order: case-insensitive first, then lowercase
/// before uppercase at the first position where the case differs.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| case_cmp(a, b))
}

// Only reached when both strings fold to the same text.
fn case_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

enum Presence {
    Both(Ordering),
    Partial(Ordering),
}

fn compare_present<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Presence {
    match (a, b) {
        (Some(a), Some(b)) => Presence::Both(cmp(&a, &b)),
        (Some(_), None) => Presence::Partial(Ordering::Less),
        (None, Some(_)) => Presence::Partial(Ordering::Greater),
        (None, None) => Presence::Partial(Ordering::Equal),
    }
}

fn text_key(value: Option<FieldValue<'_>>) -> Option<String> {
    value.map(|v| v.display().into_owned())
}

fn date_key(value: Option<FieldValue<'_>>) -> Option<NaiveDate> {
    match value? {
        FieldValue::Date(raw) | FieldValue::Text(raw) => parse_date(raw),
        FieldValue::Number(_) => None,
    }
}

fn number_key(value: Option<FieldValue<'_>>) -> Option<f64> {
    value?.as_number()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CarUser, Customer, Order};

    fn sorted_ids<R: Record>(records: &[R], label: &str) -> Vec<u64> {
        let mut rows: Vec<&R> = records.iter().collect();
        sort_records(&mut rows, find_option(R::PROFILE.sort_menu, label));
        rows.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_no_selection_keeps_store_order() {
        let customers = Customer::fixtures();
        let expected: Vec<u64> = customers.iter().map(|c| c.id).collect();
        assert_eq!(sorted_ids(&customers, ""), expected);
        assert_eq!(sorted_ids(&customers, "Shoe Size"), expected);
    }

    #[test]
    fn test_name_ascending_is_lexicographic() {
        let customers = Customer::fixtures();
        let mut rows: Vec<&Customer> = customers.iter().collect();
        sort_records(&mut rows, find_option(Customer::PROFILE.sort_menu, "name (a-z)"));
        let names: Vec<&str> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"Amal Wijesekara"));
        assert_eq!(names.last(), Some(&"Yasodha Karunaratne"));
        assert!(names.windows(2).all(|w| locale_cmp(w[0], w[1]) != Ordering::Greater));
    }

    #[test]
    fn test_join_date_newest_first() {
        let users = CarUser::fixtures();
        let ids = sorted_ids(&users, "Join Date (Newest)");
        assert_eq!(ids.first(), Some(&10));
        assert_eq!(ids.last(), Some(&9));
        let oldest = sorted_ids(&users, "Join Date (Oldest)");
        assert_eq!(oldest.first(), Some(&9));
    }

    #[test]
    fn test_numeric_sort_and_stability() {
        let mut orders = Order::fixtures();
        // Two orders with equal amounts keep their store order.
        orders[1].amount = 260.0;
        let ids = sorted_ids(&orders, "Amount (High-Low)");
        assert_eq!(ids[0], 5);
        let pos2 = ids.iter().position(|id| *id == 2).unwrap();
        let pos7 = ids.iter().position(|id| *id == 7).unwrap();
        assert_eq!(pos7, pos2 + 1);
    }

    #[test]
    fn test_unparseable_dates_sort_last_both_ways() {
        let mut users = CarUser::fixtures();
        users[0].join_date = "someday".to_string();
        assert_eq!(sorted_ids(&users, "Join Date (Newest)").last(), Some(&1));
        assert_eq!(sorted_ids(&users, "Join Date (Oldest)").last(), Some(&1));
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "zed"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_cmp_case_tie_break_outside_ascii() {
        assert_eq!(locale_cmp("élan", "Élan"), Ordering::Less);
        assert_eq!(locale_cmp("Élan", "élan"), Ordering::Greater);
        assert_eq!(locale_cmp("zoË", "zoë"), Ordering::Greater);
        // Uppercase Ÿ has a higher code point than ÿ; case still decides.
        assert_eq!(locale_cmp("ÿes", "Ÿes"), Ordering::Less);
        // The first case difference decides, not the raw byte order.
        assert_eq!(locale_cmp("öStra", "Östra"), Ordering::Less);
        assert_eq!(locale_cmp("Östra", "östrA"), Ordering::Greater);
        assert_eq!(locale_cmp("Émile", "Érik"), Ordering::Less);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-02-20"), NaiveDate::from_ymd_opt(2024, 2, 20));
        assert_eq!(
            parse_date("2024-02-20T10:15:00Z"),
            NaiveDate::from_ymd_opt(2024, 2, 20)
        );
        assert_eq!(parse_date("20/02/2024"), None);
    }
}
