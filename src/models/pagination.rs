//! Paginator payload shared by list pages

use serde::{Deserialize, Serialize};

/// Fixed number of reservations per list page
pub const PER_PAGE: u64 = 10;

/// One entry of the pagination control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    /// Target URL, `None` for disabled entries and `...` separators
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// A page of results plus the metadata needed to render page links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
    /// 1-based position of the first item on this page (None when empty)
    pub from: Option<u64>,
    /// 1-based position of the last item on this page (None when empty)
    pub to: Option<u64>,
    pub links: Vec<PageLink>,
}
