use std::any::Any;

use roster_states::{State, state_assign_impl};

use super::EmployeeColumn;
use super::sort::{SortBy, next_sort};

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

/// What the user asked the table to show.
///
/// `page_index` may point past the last page after rows disappear; the view
/// clamps it, and the navigation methods clamp before moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTableQuery {
    pub global_filter: String,
    pub sort: Option<SortBy>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for EmployeeTableQuery {
    fn default() -> Self {
        Self {
            global_filter: String::new(),
            sort: None,
            page_index: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl EmployeeTableQuery {
    /// A changed filter goes back to the first page.
    pub fn set_global_filter(&mut self, filter: impl Into<String>) {
        let filter = filter.into();
        if filter != self.global_filter {
            self.global_filter = filter;
            self.page_index = 0;
        }
    }

    pub fn toggle_sort(&mut self, column: EmployeeColumn) {
        self.sort = next_sort(self.sort, column);
        self.page_index = 0;
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn previous_page(&mut self, page_count: usize) {
        self.page_index = clamp_page(self.page_index, page_count).saturating_sub(1);
    }

    pub fn next_page(&mut self, page_count: usize) {
        self.page_index = clamp_page(self.page_index + 1, page_count);
    }

    pub fn last_page(&mut self, page_count: usize) {
        self.page_index = page_count.saturating_sub(1);
    }
}

/// Largest valid index is `page_count - 1`; an empty table still has page 0.
pub fn clamp_page(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}

impl State for EmployeeTableQuery {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
