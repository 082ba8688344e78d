//! Offset pagination metadata and page-link windows

use crate::models::pagination::{PageLink, Paginated};

/// Pages shown on each side of the current page in a long page list
const ON_EACH_SIDE: u64 = 3;

pub const PREVIOUS_LABEL: &str = "« Previous";
pub const NEXT_LABEL: &str = "Next »";
pub const GAP_LABEL: &str = "...";

/// Number of the last page; an empty result still has one page
pub fn last_page(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Assemble the paginator for one page of already-fetched rows
pub fn paginate<T>(
    data: Vec<T>,
    total: u64,
    current_page: u64,
    per_page: u64,
    page_url: impl Fn(u64) -> String,
) -> Paginated<T> {
    let last_page = last_page(total, per_page);
    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        let from = (current_page - 1) * per_page + 1;
        (Some(from), Some(from + data.len() as u64 - 1))
    };

    Paginated {
        links: page_links(current_page, last_page, page_url),
        data,
        current_page,
        last_page,
        per_page,
        total,
        from,
        to,
    }
}

/// Previous link, numbered pages (with `...` gaps on long lists), next link
pub fn page_links(current: u64, last: u64, page_url: impl Fn(u64) -> String) -> Vec<PageLink> {
    let mut links = Vec::new();

    links.push(PageLink {
        url: (current > 1).then(|| page_url(current - 1)),
        label: PREVIOUS_LABEL.to_string(),
        active: false,
    });

    for element in window(current, last) {
        match element {
            Some(page) => links.push(PageLink {
                url: Some(page_url(page)),
                label: page.to_string(),
                active: page == current,
            }),
            None => links.push(PageLink {
                url: None,
                label: GAP_LABEL.to_string(),
                active: false,
            }),
        }
    }

    links.push(PageLink {
        url: (current < last).then(|| page_url(current + 1)),
        label: NEXT_LABEL.to_string(),
        active: false,
    });

    links
}

/// Page numbers to display, `None` marking a gap
fn window(current: u64, last: u64) -> Vec<Option<u64>> {
    let pages = |start: u64, end: u64| (start..=end).map(Some).collect::<Vec<_>>();

    // Short lists show every page
    if last < ON_EACH_SIDE * 2 + 8 {
        return pages(1, last);
    }

    let window = ON_EACH_SIDE + 4;
    let mut elements;

    if current <= window {
        elements = pages(1, window + ON_EACH_SIDE);
        elements.push(None);
        elements.extend(pages(last - 1, last));
    } else if current > last - window {
        elements = pages(1, 2);
        elements.push(None);
        elements.extend(pages(last - (window + ON_EACH_SIDE - 1), last));
    } else {
        elements = pages(1, 2);
        elements.push(None);
        elements.extend(pages(current - ON_EACH_SIDE, current + ON_EACH_SIDE));
        elements.push(None);
        elements.extend(pages(last - 1, last));
    }

    elements
}
