use colend_core::{AppError, AppResult};
use serde::Serialize;

use crate::pagination::{DEFAULT_SIBLING_COUNT, PageRange, compute_range, total_pages};

/// Page navigation state for a paginated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pager {
    total_items: usize,
    page_size: usize,
    current_page: usize,
    sibling_count: usize,
}

impl Pager {
    /// Creates a pager positioned on the first page.
    pub fn new(total_items: usize, page_size: usize) -> AppResult<Self> {
        validate_page_size(page_size)?;

        Ok(Self {
            total_items,
            page_size,
            current_page: 1,
            sibling_count: DEFAULT_SIBLING_COUNT,
        })
    }

    /// Overrides the number of page links shown around the current page.
    #[must_use]
    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    /// Returns the total row count.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Returns the rows shown per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the active one-based page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the sibling window width.
    #[must_use]
    pub fn sibling_count(&self) -> usize {
        self.sibling_count
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Returns the zero-based offset of the first row on the current page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    /// Moves to `page`, clamped into the valid range.
    ///
    /// Returns whether the current page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages().max(1));
        let changed = target != self.current_page;
        self.current_page = target;
        changed
    }

    /// Moves to the first page.
    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    /// Moves one page back.
    pub fn previous(&mut self) -> bool {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// Moves one page forward.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page.saturating_add(1))
    }

    /// Moves to the last page.
    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// Returns whether a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> AppResult<()> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        self.current_page = 1;
        Ok(())
    }

    /// Updates the row count, keeping the current page inside the new range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.go_to(self.current_page);
    }

    /// Computes the page indicators for the current state.
    #[must_use]
    pub fn range(&self) -> PageRange {
        compute_range(self.total_pages(), self.current_page, self.sibling_count)
    }

    /// Returns whether the pager control should be rendered at all.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.range().should_render()
    }
}

fn validate_page_size(page_size: usize) -> AppResult<()> {
    if page_size == 0 {
        return Err(AppError::Validation(
            "page_size must be greater than zero".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::pagination::PageItem;

    use super::Pager;

    fn pager(total_items: usize, page_size: usize) -> Pager {
        Pager::new(total_items, page_size).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Pager::new(10, 0).is_err());

        let mut pager = pager(10, 5);
        assert!(pager.set_page_size(0).is_err());
        assert_eq!(pager.page_size(), 5);
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let mut pager = pager(95, 10);
        assert_eq!(pager.total_pages(), 10);
        assert!(!pager.has_previous());
        assert!(!pager.previous());

        assert!(pager.last());
        assert_eq!(pager.current_page(), 10);
        assert!(!pager.has_next());
        assert!(!pager.next());

        assert!(!pager.go_to(42));
        assert_eq!(pager.current_page(), 10);
        assert!(pager.first());
        assert_eq!(pager.current_page(), 1);

        assert!(pager.go_to(42));
        assert_eq!(pager.current_page(), 10);
    }

    #[test]
    fn offset_follows_current_page() {
        let mut pager = pager(95, 10);
        assert_eq!(pager.offset(), 0);
        pager.go_to(3);
        assert_eq!(pager.offset(), 20);
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let mut pager = pager(95, 10);
        pager.go_to(4);
        assert!(pager.set_page_size(50).is_ok());
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.total_pages(), 2);
    }

    #[test]
    fn shrinking_total_clamps_current_page() {
        let mut pager = pager(95, 10);
        pager.last();
        pager.set_total_items(25);
        assert_eq!(pager.current_page(), 3);

        pager.set_total_items(0);
        assert_eq!(pager.current_page(), 1);
        assert!(pager.range().is_empty());
    }

    #[test]
    fn range_tracks_pager_state() {
        let mut pager = pager(200, 10).with_sibling_count(1);
        pager.go_to(10);
        assert_eq!(
            pager.range().items(),
            &[
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(9),
                PageItem::Page(10),
                PageItem::Page(11),
                PageItem::Ellipsis,
                PageItem::Page(20),
            ]
        );
        assert!(pager.should_render());
    }

    #[test]
    fn single_page_tables_hide_the_pager() {
        let pager = pager(7, 10);
        assert!(!pager.should_render());
    }
}
