//! Page requests and paged results.

/// A one-based page request with an already-normalised page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Rows to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        total_pages(self.total, self.page_size)
    }
}

/// Number of pages needed to show `total` rows. An empty result still has one page.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 1;
    }

    total.div_ceil(u64::from(page_size)).max(1)
}

/// Whether `request` points outside the pages available for `total` rows.
#[must_use]
pub fn is_out_of_range(request: PageRequest, total: u64) -> bool {
    request.page == 0 || u64::from(request.page) > total_pages(total, request.page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_for_first_page() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(101, 100), 2);
    }

    #[test]
    fn first_page_of_empty_result_is_in_range() {
        assert!(!is_out_of_range(PageRequest::new(1, 10), 0));
    }

    #[test]
    fn page_zero_and_pages_past_the_end_are_out_of_range() {
        assert!(is_out_of_range(PageRequest::new(0, 10), 5));
        assert!(is_out_of_range(PageRequest::new(2, 10), 10));
        assert!(!is_out_of_range(PageRequest::new(2, 10), 11));
    }
}
