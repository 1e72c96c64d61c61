//! Fixed pages and "load more" reveal over an ordered result.

use crate::error::{Error, Result};
use std::ops::Range;

/// Paging style and page size of an entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// Previous / Next over fixed-size pages.
    Pages(usize),
    /// A growing prefix, extended one step at a time.
    LoadMore(usize),
}

impl PagingMode {
    pub fn page_size(&self) -> usize {
        match *self {
            PagingMode::Pages(size) | PagingMode::LoadMore(size) => size,
        }
    }

    pub fn with_page_size(self, size: usize) -> Self {
        match self {
            PagingMode::Pages(_) => PagingMode::Pages(size),
            PagingMode::LoadMore(_) => PagingMode::LoadMore(size),
        }
    }
}

/// 1-based page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, clamped to what `total` records allow.
    pub fn page(&self, total: usize) -> usize {
        self.page.min(self.page_count(total))
    }

    /// Always at least 1 so an empty result still has a page to show.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn has_prev(&self, total: usize) -> bool {
        self.page(total) > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page(total) < self.page_count(total)
    }

    pub fn next(&mut self, total: usize) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.page = self.page(total) + 1;
        true
    }

    pub fn prev(&mut self, total: usize) -> bool {
        if !self.has_prev(total) {
            return false;
        }
        self.page = self.page(total) - 1;
        true
    }

    pub fn go_to(&mut self, page: usize, total: usize) -> Result<()> {
        let last = self.page_count(total);
        if page == 0 || page > last {
            return Err(Error::PageOutOfRange { page, last });
        }
        self.page = page;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Index range of the current page within `total` records.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = ((self.page(total) - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

/// "Load more" reveal count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    step: usize,
    shown: usize,
}

impl Reveal {
    pub fn new(step: usize) -> Self {
        let step = step.max(1);
        Self { step, shown: step }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn visible(&self, total: usize) -> usize {
        self.shown.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.shown < total
    }

    /// Reveal one more step. Returns false when everything is shown.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.shown = (self.shown + self.step).min(total);
        true
    }

    pub fn reset(&mut self) {
        self.shown = self.step;
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        0..self.visible(total)
    }
}

/// Where the current view sits within the matching records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Page {
        page: usize,
        page_count: usize,
        has_prev: bool,
        has_next: bool,
    },
    Reveal {
        shown: usize,
        has_more: bool,
    },
}

/// Paging state held by a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paging {
    Pages(Pager),
    LoadMore(Reveal),
}

impl Paging {
    pub fn from_mode(mode: PagingMode) -> Self {
        match mode {
            PagingMode::Pages(size) => Paging::Pages(Pager::new(size)),
            PagingMode::LoadMore(step) => Paging::LoadMore(Reveal::new(step)),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Paging::Pages(pager) => pager.reset(),
            Paging::LoadMore(reveal) => reveal.reset(),
        }
    }

    /// Next page, or one more step of records.
    pub fn advance(&mut self, total: usize) -> bool {
        match self {
            Paging::Pages(pager) => pager.next(total),
            Paging::LoadMore(reveal) => reveal.load_more(total),
        }
    }

    /// Previous page. A reveal never shrinks.
    pub fn back(&mut self, total: usize) -> bool {
        match self {
            Paging::Pages(pager) => pager.prev(total),
            Paging::LoadMore(_) => false,
        }
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        match self {
            Paging::Pages(pager) => pager.range(total),
            Paging::LoadMore(reveal) => reveal.range(total),
        }
    }

    pub fn position(&self, total: usize) -> Position {
        match self {
            Paging::Pages(pager) => Position::Page {
                page: pager.page(total),
                page_count: pager.page_count(total),
                has_prev: pager.has_prev(total),
                has_next: pager.has_next(total),
            },
            Paging::LoadMore(reveal) => Position::Reveal {
                shown: reveal.visible(total),
                has_more: reveal.has_more(total),
            },
        }
    }
}
