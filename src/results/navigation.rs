// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page arithmetic: breadcrumbs, range labels, next/prev flags.
//!
//! The breadcrumb strip always has the same shape:
//!
//! ```text
//! << First   < Prev   ...   4  5 [6] 7  8   ...   Next >   Last >>
//! ```
//!
//! At most five numbered pages, centred on the current one where there is
//! room, with `...` standing in for whatever is hidden on either side. The
//! window arithmetic is signed so an empty result set (zero pages) falls out
//! without special cases.

use serde::{Deserialize, Serialize};

/// One entry in the page strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadCrumb {
    pub label: String,
    /// Clickable.
    pub active: bool,
    /// The page being shown.
    pub selected: bool,
    /// Page to go to; `None` when inactive.
    pub index: Option<usize>,
}

impl BreadCrumb {
    fn new(active: bool, selected: bool, label: impl Into<String>, index: i64) -> Self {
        Self {
            label: label.into(),
            active,
            selected,
            index: if active { usize::try_from(index).ok() } else { None },
        }
    }
}

/// Numbered pages shown at most.
pub const WINDOW: i64 = 5;

/// `ceil(total / page_size)`. Zero for an empty result set.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Highest page `goto` accepts. An empty result set still has page 0.
pub fn last_valid_page(total: usize, page_size: usize) -> usize {
    page_count(total, page_size).max(1) - 1
}

pub fn has_next(page_no: usize, page_count: usize) -> bool {
    (page_no as i64) < page_count as i64 - 1
}

pub fn has_prev(page_no: usize) -> bool {
    page_no > 0
}

/// The page strip for `page_no` out of `page_count` pages.
pub fn breadcrumbs(page_no: usize, page_count: usize) -> Vec<BreadCrumb> {
    let page = page_no as i64;
    let last = page_count as i64 - 1;

    let mut start = (page - 2).max(0);
    let end = (start + WINDOW - 1).min(last);
    start = (end - (WINDOW - 1)).max(0);

    let mut crumbs = Vec::with_capacity(WINDOW as usize + 6);
    crumbs.push(BreadCrumb::new(page > 0, false, "<< First", 0));
    crumbs.push(BreadCrumb::new(page > 0, false, "< Prev", page - 1));
    if start > 0 {
        crumbs.push(BreadCrumb::new(false, false, "...", -1));
    }
    for j in start..=end {
        crumbs.push(BreadCrumb::new(page != j, page == j, (j + 1).to_string(), j));
    }
    if end < last {
        crumbs.push(BreadCrumb::new(false, false, "...", -1));
    }
    crumbs.push(BreadCrumb::new(page < last, false, "Next >", page + 1));
    crumbs.push(BreadCrumb::new(page < last, false, "Last >>", last));
    crumbs
}

/// `[start - end of total]` for a page, `[0 results]` when there is nothing.
///
/// `start` is the zero-based index of the first row shown, `end` one past the
/// last. A page past the end of a non-empty list gets an empty label.
pub fn range_label(start: usize, end: usize, total: usize) -> String {
    if total == 0 {
        "[0 results]".to_string()
    } else if start < end {
        format!("[{} - {} of {}]", start + 1, end, total)
    } else {
        String::new()
    }
}
