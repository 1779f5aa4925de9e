use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{PaginationError, PaginationResult};

pub const DEFAULT_LIMIT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Page and slice metadata for one page of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub total_items: usize,
    pub limit: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub items_on_page: usize,
}

/// One page worth of items together with the metadata it was cut with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationState,
}

/// Validates a caller supplied page size.
pub fn validate_limit(limit: i64) -> PaginationResult<NonZeroUsize> {
    usize::try_from(limit)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(PaginationError::InvalidLimit(limit))
}

/// Computes the pagination state for `page` of a collection of `total_items`.
///
/// `page` may be any integer; it is clamped into `[1, max(total_pages, 1)]`.
/// A zero `limit` is rejected.
pub fn calculate_pagination(
    total_items: usize,
    page: i64,
    limit: usize,
) -> PaginationResult<PaginationState> {
    let limit = NonZeroUsize::new(limit).ok_or(PaginationError::InvalidLimit(0))?;
    Ok(compute(total_items, page, limit))
}

/// Slices the requested page out of `items`. The input is left untouched.
pub fn paginate_array<T: Clone>(
    items: &[T],
    page: i64,
    limit: usize,
) -> PaginationResult<Paginated<T>> {
    let pagination = calculate_pagination(items.len(), page, limit)?;
    Ok(Paginated {
        data: items[pagination.start_index..pagination.end_index].to_vec(),
        pagination,
    })
}

pub(crate) fn compute(total_items: usize, page: i64, limit: NonZeroUsize) -> PaginationState {
    let limit = limit.get();
    let total_pages = total_items.div_ceil(limit);
    let current_page = clamp_page(page, total_pages);
    let start_index = (current_page - 1) * limit;
    let end_index = start_index.saturating_add(limit).min(total_items);

    PaginationState {
        total_items,
        limit,
        current_page,
        total_pages,
        start_index,
        end_index,
        has_next_page: current_page < total_pages,
        has_prev_page: current_page > 1,
        items_on_page: end_index - start_index,
    }
}

/// Clamps a requested page into `[1, max(total_pages, 1)]`.
pub(crate) fn clamp_page(page: i64, total_pages: usize) -> usize {
    let upper = i64::try_from(total_pages.max(1)).unwrap_or(i64::MAX);
    // upper fits in usize, so the clamped value does too
    page.clamp(1, upper) as usize
}
