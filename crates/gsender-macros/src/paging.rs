//! Record list paging

use serde::{Deserialize, Serialize};

/// Default page length when none (or zero) is requested
pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// 1-based page number
    pub page: usize,
    /// Records per page
    pub page_length: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }
}

/// Page actually returned, after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub page_length: usize,
    pub total_records: usize,
}

/// A list response: all records, or one page of them plus its pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    pub records: Vec<T>,
}

impl<T> Listing<T> {
    /// Unpaged listing of `records`
    pub fn all(records: Vec<T>) -> Self {
        Self {
            pagination: None,
            records,
        }
    }
}

/// Return the `[begin, end)` record range for `paging` over `total` records.
///
/// A page past the end clamps to the last page; page 0 is treated as 1.
pub fn page_range(paging: Paging, total: usize) -> (Pagination, std::ops::Range<usize>) {
    let page_length = if paging.page_length == 0 {
        DEFAULT_PAGE_LENGTH
    } else {
        paging.page_length
    };
    let last_page = total.div_ceil(page_length).max(1);
    let page = paging.page.clamp(1, last_page);

    let begin = (page - 1) * page_length;
    let end = (begin + page_length).min(total);

    let pagination = Pagination {
        page,
        page_length,
        total_records: total,
    };
    (pagination, begin.min(end)..end)
}

/// Apply optional paging to a full record list
pub fn paginate<T>(records: Vec<T>, paging: Option<Paging>) -> Listing<T> {
    let Some(paging) = paging else {
        return Listing::all(records);
    };

    let (pagination, range) = page_range(paging, records.len());
    let records = records
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();
    Listing {
        pagination: Some(pagination),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging(page: usize, page_length: usize) -> Option<Paging> {
        Some(Paging { page, page_length })
    }

    #[test]
    fn test_last_partial_page() {
        let listing = paginate((0..25).collect::<Vec<_>>(), paging(3, 10));
        assert_eq!(listing.records, (20..25).collect::<Vec<_>>());
        assert_eq!(
            listing.pagination,
            Some(Pagination {
                page: 3,
                page_length: 10,
                total_records: 25
            })
        );
    }

    #[test]
    fn test_page_past_end_clamps_to_last_page() {
        let listing = paginate((0..25).collect::<Vec<_>>(), paging(99, 10));
        assert_eq!(listing.records, (20..25).collect::<Vec<_>>());
        assert_eq!(listing.pagination.unwrap().page, 3);
    }

    #[test]
    fn test_page_zero_and_zero_length() {
        let listing = paginate((0..5).collect::<Vec<_>>(), paging(0, 0));
        assert_eq!(listing.records, (0..5).collect::<Vec<_>>());
        let pagination = listing.pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.page_length, DEFAULT_PAGE_LENGTH);
    }

    #[test]
    fn test_empty_list() {
        let listing = paginate(Vec::<u8>::new(), paging(4, 10));
        assert!(listing.records.is_empty());
        assert_eq!(listing.pagination.unwrap().page, 1);
    }

    #[test]
    fn test_unpaged_listing_omits_pagination() {
        let listing = paginate(vec![1, 2], None);
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("pagination").is_none());
        assert_eq!(json["records"], serde_json::json!([1, 2]));
    }
}
