//! Pagination
//!
//! Splits a sequence of row slots into pages of a fixed capacity. A slot is
//! one data row or the totals row; the layout guarantees every slot has the
//! same height, so only the starting index advances from page to page.

use std::ops::Range;

/// The slots rendered on one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    /// 0-based page index
    pub index: usize,
    /// Slot indices on this page (end exclusive)
    pub slots: Range<usize>,
}

impl PageRange {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Number of pages needed for `total_slots` slots
///
/// An empty table still produces one page carrying the header band.
pub fn page_count(total_slots: usize, slots_per_page: usize) -> usize {
    if slots_per_page == 0 {
        return 1;
    }
    total_slots.div_ceil(slots_per_page).max(1)
}

/// Split `total_slots` slots into pages of `slots_per_page`
pub fn paginate(total_slots: usize, slots_per_page: usize) -> Vec<PageRange> {
    let per_page = slots_per_page.max(1);
    (0..page_count(total_slots, per_page))
        .map(|index| {
            let start = index * per_page;
            let end = (start + per_page).min(total_slots);
            PageRange {
                index,
                slots: start.min(end)..end,
            }
        })
        .collect()
}
