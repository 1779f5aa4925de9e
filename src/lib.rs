//! Page/slice arithmetic, ellipsis-compressed page windows and a stateful
//! pagination controller for in-memory collections, plus the HTTP surface
//! that serves them.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod settings;
pub mod state;
pub mod types;

pub use controller::{PaginationController, PaginationView};
pub use error::{PaginationError, PaginationResult};
pub use types::{
    build_pagination_query, calculate_pagination, generate_page_numbers, paginate_array,
    parse_pagination_params, PageLabel, Paginated, PaginationState,
};
