use serde::{Deserialize, Serialize};

/// Sort key used when a request does not name one.
pub const DEFAULT_SORT: &str = "id";
/// Page size used when a request does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Pagination/sort parameters for listing calls. Pages are 1-based on this
/// surface and translated to the engine's 0-based indexing at the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagedRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<String>,
    pub direction: SortDirection,
}

impl Default for PagedRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Some(DEFAULT_SORT.to_owned()),
            direction: SortDirection::Asc,
        }
    }
}

impl PagedRequest {
    #[must_use]
    pub fn new(page: u32, page_size: u32, sort: Option<String>, direction: SortDirection) -> Self {
        Self { page, page_size, sort, direction }
    }

    /// Same filter and sort, next page. Used by the last-page probe.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self { page: self.page + 1, ..self.clone() }
    }
}

/// One page of results plus the derived last-page flag.
///
/// The engine does not report total counts reliably, so `last_page` is
/// inferred by the listing pipeline rather than read off the response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub last_page: bool,
}
