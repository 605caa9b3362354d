//! Page slicing and the page-button layout.

use std::num::NonZeroUsize;

use gamehub_protocol::constants::PAGER_WINDOW;

/// One page of a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based, always within `1..=total_pages`.
    pub page: usize,
    pub total_pages: usize,
}

/// Number of pages needed for `len` items. Never less than 1.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Clamps a requested page number into `1..=total_pages`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Slices `filtered` down to the requested page, clamping out-of-range
/// requests to the first or last page.
pub fn compute_page<T>(filtered: &[T], page_size: NonZeroUsize, requested: usize) -> Page<'_, T> {
    let total_pages = total_pages(filtered.len(), page_size);
    let page = clamp_page(requested, total_pages);

    let start = ((page - 1) * page_size.get()).min(filtered.len());
    let end = (start + page_size.get()).min(filtered.len());

    Page {
        items: &filtered[start..end],
        page,
        total_pages,
    }
}

/// First and last page of the numbered window around `page`.
fn window_bounds(page: usize, total_pages: usize) -> (usize, usize) {
    let half = PAGER_WINDOW / 2;
    let end = (page.saturating_sub(half).max(1) + PAGER_WINDOW - 1).min(total_pages);
    let start = end.saturating_sub(PAGER_WINDOW - 1).max(1);
    (start, end)
}

/// A control in the pager bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerItem {
    Prev { target: usize, enabled: bool },
    Number { page: usize, current: bool },
    Ellipsis,
    Next { target: usize, enabled: bool },
}

/// The full pager bar for one page position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerLayout {
    pub page: usize,
    pub total_pages: usize,
    pub items: Vec<PagerItem>,
}

impl PagerLayout {
    /// Builds the bar: prev, an optional `1 …` prefix, up to
    /// [`PAGER_WINDOW`] numbered buttons centred on `page`, an optional
    /// `… last` suffix, next.
    pub fn new(page: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let page = clamp_page(page, total_pages);

        let (start, end) = window_bounds(page, total_pages);

        let mut items = Vec::with_capacity(PAGER_WINDOW + 6);
        items.push(PagerItem::Prev {
            target: clamp_page(page - 1, total_pages),
            enabled: page > 1,
        });

        if start > 1 {
            items.push(PagerItem::Number {
                page: 1,
                current: false,
            });
            if start > 2 {
                items.push(PagerItem::Ellipsis);
            }
        }

        items.extend((start..=end).map(|n| PagerItem::Number {
            page: n,
            current: n == page,
        }));

        if end < total_pages {
            if end + 1 < total_pages {
                items.push(PagerItem::Ellipsis);
            }
            items.push(PagerItem::Number {
                page: total_pages,
                current: false,
            });
        }

        items.push(PagerItem::Next {
            target: clamp_page(page + 1, total_pages),
            enabled: page < total_pages,
        });

        Self {
            page,
            total_pages,
            items,
        }
    }

    /// Whether there is only one page, so the bar can be hidden.
    pub fn is_single_page(&self) -> bool {
        self.total_pages <= 1
    }

    /// Numbered pages in display order.
    pub fn numbers(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PagerItem::Number { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }
}
