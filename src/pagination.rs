use std::fmt;

use crate::constants::PAGINATION_DELTA;

/// One entry of a page selector: a page to link to, or an elided run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(page) => write!(f, "{page}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Builds the compact page selector for `current` out of `total` pages: the
/// first page, a window of two pages either side of `current`, the last page,
/// and an ellipsis wherever pages are skipped.
///
/// `total` below 1 is treated as 1 and `current` is clamped into
/// `1..=total`, so the result always starts with page 1 and never repeats a
/// page.
pub fn pagination_numbers(current: u32, total: u32) -> Vec<PageMarker> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    let start = current.saturating_sub(PAGINATION_DELTA).max(2);
    let end = current.saturating_add(PAGINATION_DELTA).min(total - 1);

    let mut markers = vec![PageMarker::Page(1)];
    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((start..=end).map(PageMarker::Page));
    if end < total.saturating_sub(1) {
        markers.push(PageMarker::Ellipsis);
    }
    if total > 1 {
        markers.push(PageMarker::Page(total));
    }
    markers
}

/// Number of pages needed for `total_items`, never less than one.
pub fn page_count(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Position within a paged list, kept inside `1..=total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: u32,
    total: u32,
}

impl PageCursor {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// The previous page, or `None` when already on the first one.
    pub fn previous(&self) -> Option<PageCursor> {
        self.has_previous()
            .then(|| PageCursor::new(self.current - 1, self.total))
    }

    /// The next page, or `None` when already on the last one.
    pub fn next(&self) -> Option<PageCursor> {
        self.has_next()
            .then(|| PageCursor::new(self.current + 1, self.total))
    }

    pub fn go_to(&self, page: u32) -> PageCursor {
        PageCursor::new(page, self.total)
    }

    pub fn markers(&self) -> Vec<PageMarker> {
        pagination_numbers(self.current, self.total)
    }
}

/// Renders markers the way the page selector lays them out, marking the
/// current page with brackets.
pub fn render_markers(markers: &[PageMarker], current: u32) -> String {
    markers
        .iter()
        .map(|marker| match marker {
            PageMarker::Page(page) if *page == current => format!("[{page}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
