//! Fixed-size pages over an ordered collection
//!
//! Pages are 1-based. Out-of-range requests yield an empty page rather than
//! an error, so a stale page number can never panic; [`Pager::clamp_to`]
//! pulls it back into range when the collection shrinks.

/// Default number of items per page in the media grid
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Number of pages needed for `len` items
///
/// Zero for an empty collection or a zero page size.
#[must_use]
pub const fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// The `page_number`-th page of `items`
///
/// Returns the slice `[(n-1)*size, n*size)` cut down to what exists. Page 0,
/// a zero page size or a page past the end give an empty slice.
#[must_use]
pub fn page<T>(items: &[T], page_size: usize, page_number: usize) -> &[T] {
    if page_size == 0 || page_number == 0 {
        return &[];
    }
    let start = (page_number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page cursor for one collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A pager at page 1
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self { page_size, current: 1 }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Back to page 1; call whenever the filtered collection changes
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Advance one page if there is one
    pub fn next(&mut self, len: usize) {
        if self.current < page_count(len, self.page_size) {
            self.current += 1;
        }
    }

    /// Go back one page, stopping at page 1
    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    /// Jump to page `n`, clamped to `1..=page_count`
    pub fn go_to(&mut self, n: usize, len: usize) {
        let last = page_count(len, self.page_size).max(1);
        self.current = n.clamp(1, last);
    }

    /// Reset to page 1 if the current page no longer exists
    pub fn clamp_to(&mut self, len: usize) {
        if self.current > page_count(len, self.page_size).max(1) {
            self.reset();
        }
    }

    /// The current page of `items`
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.page_size, self.current)
    }

    /// Human-readable position, e.g. `"51–100 of 120"`
    #[must_use]
    pub fn range_label(&self, len: usize) -> String {
        if len == 0 || self.page_size == 0 {
            return format!("0 of {len}");
        }
        let first = (self.current - 1) * self.page_size + 1;
        if first > len {
            return format!("0 of {len}");
        }
        let last = (self.current * self.page_size).min(len);
        format!("{first}–{last} of {len}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 50), 0);
        assert_eq!(page_count(1, 50), 1);
        assert_eq!(page_count(50, 50), 1);
        assert_eq!(page_count(51, 50), 2);
        assert_eq!(page_count(10, 0), 0);
    }

    #[test]
    fn test_page_slices() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(page(&items, 3, 1), &[1, 2, 3]);
        assert_eq!(page(&items, 3, 3), &[7]);
        assert!(page(&items, 3, 4).is_empty());
        assert!(page(&items, 3, 0).is_empty());
        assert!(page(&items, 0, 1).is_empty());
        assert!(page::<u32>(&[], 3, 1).is_empty());
        assert!(page(&items, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_pager_navigation() {
        let mut pager = Pager::new(10);
        pager.prev();
        assert_eq!(pager.current(), 1);

        pager.next(25);
        pager.next(25);
        pager.next(25);
        assert_eq!(pager.current(), 3);

        pager.go_to(99, 25);
        assert_eq!(pager.current(), 3);
        pager.go_to(0, 25);
        assert_eq!(pager.current(), 1);
    }

    #[test]
    fn test_clamp_resets_stale_page() {
        let mut pager = Pager::new(10);
        pager.go_to(5, 50);
        pager.clamp_to(12);
        assert_eq!(pager.current(), 1);

        pager.go_to(2, 12);
        pager.clamp_to(15);
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_range_label() {
        let mut pager = Pager::new(50);
        assert_eq!(pager.range_label(120), "1–50 of 120");
        pager.next(120);
        assert_eq!(pager.range_label(120), "51–100 of 120");
        pager.next(120);
        assert_eq!(pager.range_label(120), "101–120 of 120");
        assert_eq!(pager.range_label(0), "0 of 0");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pages_reconstruct_input(items in prop::collection::vec(any::<u16>(), 0..300), size in 1usize..40) {
                let count = page_count(items.len(), size);
                let joined: Vec<u16> = (1..=count).flat_map(|n| page(&items, size, n).to_vec()).collect();
                prop_assert_eq!(joined, items.clone());

                for n in count + 1..count + 4 {
                    prop_assert!(page(&items, size, n).is_empty());
                }
            }
        }
    }
}
