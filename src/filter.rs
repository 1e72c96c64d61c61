//! Predicate chain: search text, equality selections and numeric buckets,
//! all combined with AND.

use crate::record::Record;
use std::collections::BTreeMap;

/// Sentinel value that disables a discrete filter.
pub const ALL: &str = "All";

/// State of a discrete filter control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Blank input and any casing of `All` select everything.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Value(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// A fixed numeric range with an inclusive lower bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
    pub max_inclusive: bool,
}

impl Bucket {
    /// `[min, max)`
    pub const fn range(label: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            min,
            max: Some(max),
            max_inclusive: false,
        }
    }

    /// `[min, max]`
    pub const fn through(label: &'static str, min: f64, max: f64) -> Self {
        Self {
            label,
            min,
            max: Some(max),
            max_inclusive: true,
        }
    }

    /// `[min, ∞)`
    pub const fn at_least(label: &'static str, min: f64) -> Self {
        Self {
            label,
            min,
            max: None,
            max_inclusive: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        if value.is_nan() || value < self.min {
            return false;
        }
        match self.max {
            Some(max) if self.max_inclusive => value <= max,
            Some(max) => value < max,
            None => true,
        }
    }
}

/// The bucket menu offered for one numeric field.
#[derive(Debug, Clone, Copy)]
pub struct BucketFilter {
    pub field: &'static str,
    pub buckets: &'static [Bucket],
}

impl BucketFilter {
    pub const fn new(field: &'static str, buckets: &'static [Bucket]) -> Self {
        Self { field, buckets }
    }

    pub fn find(&self, label: &str) -> Option<&'static Bucket> {
        let label = label.trim();
        self.buckets
            .iter()
            .find(|bucket| bucket.label.eq_ignore_ascii_case(label))
    }
}

/// Active criteria for one browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    /// Lowercased search text; `None` when blank.
    search: Option<String>,
    equals: BTreeMap<&'static str, String>,
    buckets: BTreeMap<&'static str, &'static Bucket>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn set_search(&mut self, query: &str) {
        let query = query.trim();
        self.search = if query.is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
    }

    pub fn set_selection(&mut self, field: &'static str, selection: Selection) {
        match selection {
            Selection::All => {
                self.equals.remove(field);
            }
            Selection::Value(value) => {
                self.equals.insert(field, value);
            }
        }
    }

    pub fn selection(&self, field: &str) -> Selection {
        self.equals
            .get(field)
            .map(|value| Selection::Value(value.clone()))
            .unwrap_or_default()
    }

    pub fn set_bucket(&mut self, field: &'static str, bucket: Option<&'static Bucket>) {
        match bucket {
            Some(bucket) => {
                self.buckets.insert(field, bucket);
            }
            None => {
                self.buckets.remove(field);
            }
        }
    }

    pub fn bucket(&self, field: &str) -> Option<&'static Bucket> {
        self.buckets.get(field).copied()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.equals.is_empty() && self.buckets.is_empty()
    }

    /// Human-readable list of the active predicates.
    pub fn describe(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(search) = &self.search {
            parts.push(format!("search \"{}\"", search));
        }
        for (field, value) in &self.equals {
            parts.push(format!("{} = {}", field, value));
        }
        for (field, bucket) in &self.buckets {
            parts.push(format!("{} in {}", field, bucket.label));
        }
        parts
    }

    pub fn matches<R: Record>(&self, record: &R, search_fields: &[&str]) -> bool {
        if let Some(needle) = &self.search {
            let hit = search_fields
                .iter()
                .filter_map(|field| record.field(field))
                .any(|value| value.contains_lowercase(needle));
            if !hit {
                return false;
            }
        }

        let equals_ok = self.equals.iter().all(|(field, wanted)| {
            record
                .field(field)
                .is_some_and(|value| value.matches_selection(wanted))
        });
        if !equals_ok {
            return false;
        }

        self.buckets.iter().all(|(field, bucket)| {
            record
                .field(field)
                .and_then(|value| value.as_number())
                .is_some_and(|n| bucket.contains(n))
        })
    }

    /// Records passing every predicate, in store order.
    pub fn apply<'a, R: Record>(&self, records: &'a [R], search_fields: &[&str]) -> Vec<&'a R> {
        records
            .iter()
            .filter(|record| self.matches(*record, search_fields))
            .collect()
    }
}
