use serde::{Deserialize, Serialize};

/// Number of page links shown on each side of the current page by default.
pub const DEFAULT_SIBLING_COUNT: usize = 1;

/// Fixed slots besides the sibling window: first, last, current and two ellipses.
const FIXED_SLOTS: usize = 5;

/// One entry rendered by a pager control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageItem {
    /// A clickable one-based page number.
    Page(usize),
    /// A placeholder for an elided run of page numbers.
    Ellipsis,
}

impl PageItem {
    /// Returns the page number, or `None` for an ellipsis.
    #[must_use]
    pub fn page(&self) -> Option<usize> {
        match self {
            Self::Page(page) => Some(*page),
            Self::Ellipsis => None,
        }
    }

    /// Returns whether this entry is an ellipsis placeholder.
    #[must_use]
    pub fn is_ellipsis(&self) -> bool {
        matches!(self, Self::Ellipsis)
    }
}

/// Ordered page indicators a pager control should display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageRange(Vec<PageItem>);

impl PageRange {
    /// Returns the entries in display order.
    #[must_use]
    pub fn items(&self) -> &[PageItem] {
        self.0.as_slice()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the range has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether a pager is worth rendering for this range.
    ///
    /// Ranges with fewer than two entries cover a single page at most and the
    /// control is suppressed.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.0.len() >= 2
    }

    /// Iterates over the page numbers, skipping ellipsis entries.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter_map(PageItem::page)
    }

    /// Consumes the range and returns its entries.
    #[must_use]
    pub fn into_items(self) -> Vec<PageItem> {
        self.0
    }
}

impl IntoIterator for PageRange {
    type Item = PageItem;
    type IntoIter = std::vec::IntoIter<PageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PageRange {
    type Item = &'a PageItem;
    type IntoIter = std::slice::Iter<'a, PageItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Computes the page indicators for a pager control.
///
/// `current_page` is clamped into `1..=total_count`. A zero `total_count`
/// yields an empty range. When the whole range fits into
/// `2 * sibling_count + 5` slots every page is listed; otherwise the first and
/// last pages stay pinned and elided runs collapse into [`PageItem::Ellipsis`].
#[must_use]
pub fn compute_range(total_count: usize, current_page: usize, sibling_count: usize) -> PageRange {
    if total_count == 0 {
        return PageRange::default();
    }

    let current_page = current_page.clamp(1, total_count);
    let total_page_numbers = sibling_count.saturating_mul(2).saturating_add(FIXED_SLOTS);
    if total_page_numbers >= total_count {
        return full_range(total_count);
    }

    let left_sibling = current_page.saturating_sub(sibling_count).max(1);
    let right_sibling = current_page.saturating_add(sibling_count).min(total_count);
    let show_left_ellipsis = left_sibling > 2;
    let show_right_ellipsis = right_sibling < total_count.saturating_sub(2);

    // Pages shown next to a single ellipsis: the sibling window, the current
    // page, and the two slots freed by the missing ellipsis and pinned edge.
    let edge_span = total_page_numbers - 2;

    let items = match (show_left_ellipsis, show_right_ellipsis) {
        (false, true) => {
            let mut items: Vec<PageItem> = (1..=edge_span).map(PageItem::Page).collect();
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_count));
            items
        }
        (true, false) => {
            let mut items = vec![PageItem::Page(1), PageItem::Ellipsis];
            items.extend((total_count - edge_span + 1..=total_count).map(PageItem::Page));
            items
        }
        (true, true) => {
            let mut items = vec![PageItem::Page(1), PageItem::Ellipsis];
            items.extend((left_sibling..=right_sibling).map(PageItem::Page));
            items.push(PageItem::Ellipsis);
            items.push(PageItem::Page(total_count));
            items
        }
        // Unreachable once the full-range guard above has passed.
        (false, false) => return full_range(total_count),
    };

    PageRange(items)
}

fn full_range(total_count: usize) -> PageRange {
    PageRange((1..=total_count).map(PageItem::Page).collect())
}

/// Returns the number of pages needed to show `total_items` rows.
#[must_use]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    total_items.div_ceil(page_size)
}

fn default_sibling_count() -> i64 {
    DEFAULT_SIBLING_COUNT as i64
}

/// Page range inputs as sent by a table widget.
///
/// Values are signed so that out-of-range input can be normalized here instead
/// of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRangeRequest {
    /// Total number of pages.
    pub total_count: i64,
    /// Active one-based page.
    pub current_page: i64,
    /// Page links on each side of the active page.
    #[serde(default = "default_sibling_count")]
    pub sibling_count: i64,
}

impl PageRangeRequest {
    /// Creates a request with the default sibling count.
    #[must_use]
    pub fn new(total_count: i64, current_page: i64) -> Self {
        Self {
            total_count,
            current_page,
            sibling_count: default_sibling_count(),
        }
    }

    /// Computes the page range after clamping negative inputs to zero.
    #[must_use]
    pub fn compute(&self) -> PageRange {
        compute_range(
            non_negative(self.total_count),
            non_negative(self.current_page),
            non_negative(self.sibling_count),
        )
    }
}

fn non_negative(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}
