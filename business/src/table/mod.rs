//! Filtering, sorting and paging of the employee table.

mod column;
mod query;
mod sort;
mod view;

pub use column::EmployeeColumn;
pub use query::{EmployeeTableQuery, PAGE_SIZE, clamp_page};
pub use sort::{SortBy, SortDirection, compare_alphanumeric, next_sort, sort_rows};
pub use view::{EmployeeTableCompute, derive_view, matches_filter};
