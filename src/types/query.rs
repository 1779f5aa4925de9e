use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use super::pagination::DEFAULT_LIMIT;

pub const MAX_LIMIT: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// `page`/`limit` pair as mirrored into a URL query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: NonZeroUsize,
}

/// Fallbacks applied while parsing a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamDefaults {
    pub limit: NonZeroUsize,
    pub max_limit: NonZeroUsize,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

#[derive(Deserialize, Default)]
struct RawParams {
    page: Option<String>,
    limit: Option<String>,
}

impl PaginationParams {
    /// Offset of the first item, ignoring the collection length.
    pub fn offset(&self) -> usize {
        usize::try_from(self.page.max(1) - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.limit.get())
    }

    pub fn to_query(&self) -> String {
        build_pagination_query(self.page, self.limit.get())
    }
}

/// Reads `page` and `limit` out of a raw query string.
///
/// Missing or malformed pages fall back to 1. Missing, malformed or
/// non-positive limits fall back to the default limit, and limits are capped
/// at `max_limit`. Unrelated keys are ignored.
pub fn parse_pagination_params(query: Option<&str>, defaults: ParamDefaults) -> PaginationParams {
    let raw = query
        .and_then(|query| serde_urlencoded::from_str::<RawParams>(query).ok())
        .unwrap_or_default();

    let page = raw
        .page
        .and_then(|page| page.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);
    let limit = raw
        .limit
        .and_then(|limit| limit.trim().parse::<usize>().ok())
        .and_then(NonZeroUsize::new)
        .unwrap_or(defaults.limit)
        .min(defaults.max_limit);

    PaginationParams { page, limit }
}

/// Encodes `page` and `limit` as `page=<page>&limit=<limit>`.
pub fn build_pagination_query(page: i64, limit: usize) -> String {
    serde_urlencoded::to_string(&[("page", page.to_string()), ("limit", limit.to_string())])
        .unwrap_or_else(|_| format!("page={}&limit={}", page, limit))
}
