pub mod page_numbers;
pub mod pagination;
pub mod query;

pub use page_numbers::{generate_page_numbers, PageLabel, DEFAULT_MAX_VISIBLE, MAX_VISIBLE_CAP};
pub use pagination::{
    calculate_pagination, paginate_array, validate_limit, Paginated, PaginationState,
    DEFAULT_LIMIT,
};
pub use query::{
    build_pagination_query, parse_pagination_params, PaginationParams, ParamDefaults, MAX_LIMIT,
};
