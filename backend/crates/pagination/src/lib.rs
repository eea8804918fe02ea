//! Offset pagination primitives shared by backend endpoints.
//!
//! A [`PageRequest`] captures a zero-based page index together with a
//! validated page size; [`Page`] is the response envelope carrying one slice
//! of a result set plus the totals and navigation flags derived from the
//! overall element count. Keeping the arithmetic here means every endpoint
//! reports `total_pages`, `has_next`, and `has_previous` the same way.

use serde::{Deserialize, Serialize};

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The requested size was zero.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// The requested size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}, got {size}")]
    SizeTooLarge {
        /// Requested size.
        size: u32,
        /// Upper bound the request must respect.
        max: u32,
    },
}

/// Zero-based page index plus a validated page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and construct a request for the given page and size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroSize`] for a zero size and
    /// [`PageRequestError::SizeTooLarge`] when the size exceeds
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of elements per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }

    /// Maximum number of elements on this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }
}

/// Paged response envelope.
///
/// All navigation fields are derived from the total element count and the
/// originating [`PageRequest`]; callers never set them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Elements on this page, in result order.
    pub items: Vec<T>,
    /// Zero-based index of this page.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Total number of pages at the requested size.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Build a page from one slice of results and the overall element count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        let page = u64::from(request.page());
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages,
            has_next: page + 1 < total_pages,
            has_previous: page > 0,
        }
    }

    /// Build an empty page for the given request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Map the page contents, preserving the envelope.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
