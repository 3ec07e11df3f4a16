//! Offset/count pagination driver

use anyhow::Result;

use crate::error::ConfigError;

/// The slice of a remote collection requested by one page call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub count: usize,
    pub offset: usize,
}

impl PageWindow {
    /// Query parameters for the window
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            ("count", self.count.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

/// Walks a remote collection page by page until its reported total is covered
#[derive(Debug, Clone, Copy)]
pub struct Pager {
    page_size: usize,
}

impl Pager {
    /// Create a pager; the page size must be positive
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        Ok(Self { page_size })
    }

    /// Collect every item of a paged collection, in arrival order
    ///
    /// `fetch_page` appends the decoded items of one window to the accumulator
    /// and returns the total item count reported by the server. Paging stops
    /// once `total_items <= offset + count`. Errors are returned as-is.
    pub fn page<T, F>(&self, mut fetch_page: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Vec<T>, PageWindow) -> Result<u64>,
    {
        let mut items = Vec::new();
        let mut offset = 0;

        loop {
            let window = PageWindow {
                count: self.page_size,
                offset,
            };
            let total_items = fetch_page(&mut items, window)?;

            let next_offset = offset + self.page_size;
            if total_items > next_offset as u64 {
                offset = next_offset;
            } else {
                return Ok(items);
            }
        }
    }
}
