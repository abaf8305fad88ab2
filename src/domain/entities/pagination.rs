use serde::{Deserialize, Serialize};

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const DEFAULT_LIMIT: u32 = 10;
pub const LIMIT_OPTIONS: [u32; 4] = [5, 10, 20, 50];

/// Active page (1-indexed) and page size of a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

impl PageParams {
    pub fn first(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    /// Missing or malformed values fall back to page 1 and `default_limit`.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, default_limit: u32) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(1),
            limit: parse_positive(limit).unwrap_or(default_limit.max(1)),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
}

/// Server-reported counts for one page of a filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Pagination {
    pub fn compute(params: PageParams, total: u64) -> Self {
        let limit = params.limit.max(1);
        let pages = total.div_ceil(u64::from(limit)).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        Self {
            page: params.page,
            limit,
            total,
            total_pages,
            has_next: params.page < total_pages,
            has_previous: params.page > 1,
        }
    }

    /// 1-based inclusive range of rows shown, `(0, 0)` when the page has no rows.
    pub fn visible_range(&self) -> (u64, u64) {
        let page = u64::from(self.page.max(1));
        let limit = u64::from(self.limit);
        let from = (page - 1).saturating_mul(limit).saturating_add(1);
        if from > self.total {
            return (0, 0);
        }
        let to = page.saturating_mul(limit).min(self.total);
        (from, to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: Pagination,
}

/// Parameters of a filtered, paginated list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: PageParams,
    pub filters: Vec<String>,
}
