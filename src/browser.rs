//! Client-side record browser: filter, then sort, then page, over an
//! in-memory record store.
//!
//! Every view is recomputed from the full store. Changing the search text or
//! any filter resets paging to the first page (or first reveal step), since a
//! page that was valid before narrowing may no longer exist.

use crate::error::{Error, Result};
use crate::filter::{BucketFilter, FilterChain, Selection};
use crate::pager::{Paging, PagingMode, Position};
use crate::record::Record;
use crate::render::Column;
use crate::sort::{self, SortOption};
use tracing::debug;

/// Static per-entity browser setup.
#[derive(Debug)]
pub struct BrowserProfile {
    pub title: &'static str,
    /// REST path segment under `/api/`.
    pub endpoint: &'static str,
    /// Fields matched by the free-text search.
    pub search_fields: &'static [&'static str],
    /// Fields offered as discrete equality filters.
    pub filters: &'static [&'static str],
    pub buckets: &'static [BucketFilter],
    pub sort_menu: &'static [SortOption],
    pub paging: PagingMode,
    pub columns: &'static [Column],
}

impl BrowserProfile {
    pub fn filter_field(&self, name: &str) -> Option<&'static str> {
        let name = name.trim();
        self.filters
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(name))
    }

    pub fn bucket_filter(&self, field: &str) -> Option<&'static BucketFilter> {
        let field = field.trim();
        self.buckets
            .iter()
            .find(|bucket| bucket.field.eq_ignore_ascii_case(field))
    }
}

/// One rendered state of the browser.
#[derive(Debug)]
pub struct View<'a, R> {
    pub rows: Vec<&'a R>,
    /// Records passing the filters.
    pub matched: usize,
    /// Records in the store.
    pub total: usize,
    pub position: Position,
}

impl<R> View<'_, R> {
    /// True when there is nothing to show, whether the store is empty or
    /// nothing matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct RecordBrowser<R: Record> {
    profile: &'static BrowserProfile,
    records: Vec<R>,
    filters: FilterChain,
    sort: Option<&'static SortOption>,
    paging: Paging,
}

impl<R: Record> RecordBrowser<R> {
    pub fn new(records: Vec<R>) -> Self {
        let profile = R::PROFILE;
        Self {
            profile,
            records,
            filters: FilterChain::new(),
            sort: None,
            paging: Paging::from_mode(profile.paging),
        }
    }

    /// Browser over the built-in fixture records.
    pub fn with_fixtures() -> Self {
        Self::new(R::fixtures())
    }

    pub fn with_page_size(mut self, size: usize) -> Self {
        self.paging = Paging::from_mode(self.profile.paging.with_page_size(size));
        self
    }

    pub fn profile(&self) -> &'static BrowserProfile {
        self.profile
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub fn sort_option(&self) -> Option<&'static SortOption> {
        self.sort
    }

    /// Swap in a freshly loaded store.
    pub fn replace_records(&mut self, records: Vec<R>) {
        debug!(entity = self.profile.title, count = records.len(), "record store replaced");
        self.records = records;
        self.paging.reset();
    }

    pub fn search(&mut self, query: &str) {
        self.filters.set_search(query);
        self.paging.reset();
    }

    /// Set a discrete filter; `All` clears it.
    pub fn filter(&mut self, field: &str, value: &str) -> Result<()> {
        let field = self
            .profile
            .filter_field(field)
            .ok_or_else(|| Error::UnknownFilter {
                entity: self.profile.title,
                field: field.to_string(),
            })?;
        self.filters.set_selection(field, Selection::parse(value));
        self.paging.reset();
        Ok(())
    }

    /// Select a numeric bucket by label; `All` clears it.
    pub fn bucket(&mut self, field: &str, label: &str) -> Result<()> {
        let menu = self
            .profile
            .bucket_filter(field)
            .ok_or_else(|| Error::UnknownFilter {
                entity: self.profile.title,
                field: field.to_string(),
            })?;
        let bucket = match Selection::parse(label) {
            Selection::All => None,
            Selection::Value(label) => Some(menu.find(&label).ok_or_else(|| Error::UnknownBucket {
                field: menu.field.to_string(),
                label,
            })?),
        };
        self.filters.set_bucket(menu.field, bucket);
        self.paging.reset();
        Ok(())
    }

    /// Pick a sort menu entry. Unknown or blank labels fall back to store
    /// order; returns whether the label was recognized.
    pub fn sort_by(&mut self, label: &str) -> bool {
        self.sort = sort::find_option(self.profile.sort_menu, label);
        if self.sort.is_none() && !label.trim().is_empty() {
            debug!(entity = self.profile.title, label, "unknown sort label, using store order");
        }
        self.sort.is_some()
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.paging.reset();
    }

    pub fn next_page(&mut self) -> bool {
        let matched = self.matched_count();
        self.paging.advance(matched)
    }

    pub fn prev_page(&mut self) -> bool {
        let matched = self.matched_count();
        self.paging.back(matched)
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        let matched = self.matched_count();
        match &mut self.paging {
            Paging::Pages(pager) => pager.go_to(page, matched),
            Paging::LoadMore(reveal) => {
                // Reveal mode has no page index; showing page N means
                // revealing N steps.
                let last = matched.div_ceil(reveal.step()).max(1);
                if page == 0 || page > last {
                    return Err(Error::PageOutOfRange { page, last });
                }
                reveal.reset();
                for _ in 1..page {
                    reveal.load_more(matched);
                }
                Ok(())
            }
        }
    }

    /// Extend a "load more" view. Fixed-page browsers move to the next page.
    pub fn load_more(&mut self) -> bool {
        self.next_page()
    }

    /// All matching records in display order, before paging.
    pub fn matching(&self) -> Vec<&R> {
        let mut rows = self.filters.apply(&self.records, self.profile.search_fields);
        sort::sort_records(&mut rows, self.sort);
        rows
    }

    fn matched_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| self.filters.matches(*record, self.profile.search_fields))
            .count()
    }

    pub fn view(&self) -> View<'_, R> {
        let matching = self.matching();
        let matched = matching.len();
        let range = self.paging.range(matched);
        View {
            rows: matching[range].to_vec(),
            matched,
            total: self.records.len(),
            position: self.paging.position(matched),
        }
    }

    pub fn find(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Add a record locally. Ids must stay unique.
    pub fn insert(&mut self, record: R) -> Result<()> {
        if self.find(record.id()).is_some() {
            return Err(Error::DuplicateId(record.id()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Replace a record with the same id, e.g. after the backend confirms a change.
    pub fn upsert(&mut self, record: R) {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Id for a locally added record: one past the largest in the store.
    pub fn next_id(&self) -> u64 {
        self.records.iter().map(Record::id).max().unwrap_or(0) + 1
    }

    /// Store position of a record, for putting it back after a failed delete.
    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    pub fn remove(&mut self, id: u64) -> Result<R> {
        let index = self.position(id).ok_or(Error::NotFound(id))?;
        Ok(self.records.remove(index))
    }

    /// Put a removed record back at its old store position.
    pub fn restore(&mut self, index: usize, record: R) {
        let index = index.min(self.records.len());
        self.records.insert(index, record);
    }

    /// Optimistically enable or disable a record. Returns the previous
    /// record so the caller can roll back if persisting fails.
    ///
    /// Only the action the row currently offers is allowed: Enable on a
    /// suspended record, Disable on any other.
    pub fn set_enabled(&mut self, id: u64, enabled: bool) -> Result<R> {
        let title = self.profile.title;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or(Error::NotFound(id))?;
        if record.suspended().is_none() {
            return Err(Error::NotToggleable(title));
        }
        let actions = record.actions();
        let (offered, action) = if enabled {
            (actions.enable, "Enable")
        } else {
            (actions.disable, "Disable")
        };
        if !offered {
            return Err(Error::ActionNotOffered { id, action });
        }
        let previous = record.clone();
        if !record.set_suspended(!enabled) {
            return Err(Error::NotToggleable(title));
        }
        debug!(entity = title, id, enabled, "status toggled locally");
        Ok(previous)
    }
}
