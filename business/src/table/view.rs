use std::any::{Any, TypeId};

use roster_states::{Compute, ComputeDeps, Dep, Updater, assign_impl};

use super::query::{EmployeeTableQuery, PAGE_SIZE, clamp_page};
use super::sort::{SortBy, sort_rows};
use super::EmployeeColumn;
use crate::employee::Employee;
use crate::list_compute::EmployeeListCompute;

/// The page of rows the table renders.
///
/// Re-derived whenever the query or the cached list changes: filter, then sort,
/// then cut out the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeTableCompute {
    pub rows: Vec<Employee>,
    pub total_rows: usize,
    /// Rows left after filtering, across all pages.
    pub filtered_rows: usize,
    pub page_index: usize,
    /// Never zero.
    pub page_count: usize,
    pub page_size: usize,
    pub sort: Option<SortBy>,
}

impl Default for EmployeeTableCompute {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_rows: 0,
            filtered_rows: 0,
            page_index: 0,
            page_count: 1,
            page_size: PAGE_SIZE,
            sort: None,
        }
    }
}

impl EmployeeTableCompute {
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// "2 of 3"
    pub fn page_label(&self) -> String {
        format!("{} of {}", self.page_index + 1, self.page_count)
    }

    pub fn sort_for(&self, column: EmployeeColumn) -> Option<SortBy> {
        self.sort.filter(|sort| sort.column == column)
    }
}

/// Case-insensitive substring match against any cell. An empty filter keeps everything.
pub fn matches_filter(employee: &Employee, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    EmployeeColumn::ALL.iter().any(|column| {
        column
            .cell_text(employee)
            .to_lowercase()
            .contains(&needle)
    })
}

pub fn derive_view(employees: &[Employee], query: &EmployeeTableQuery) -> EmployeeTableCompute {
    let page_size = query.page_size.max(1);
    let needle = query.global_filter.trim();
    let mut rows: Vec<&Employee> = employees
        .iter()
        .filter(|employee| matches_filter(employee, needle))
        .collect();
    sort_rows(&mut rows, query.sort);

    let filtered_rows = rows.len();
    let page_count = filtered_rows.div_ceil(page_size).max(1);
    let page_index = clamp_page(query.page_index, page_count);
    let page = rows
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .cloned()
        .collect();

    EmployeeTableCompute {
        rows: page,
        total_rows: employees.len(),
        filtered_rows,
        page_index,
        page_count,
        page_size,
        sort: query.sort,
    }
}

impl Compute for EmployeeTableCompute {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn deps(&self) -> ComputeDeps {
        ComputeDeps::new(
            vec![TypeId::of::<EmployeeTableQuery>()],
            vec![TypeId::of::<EmployeeListCompute>()],
        )
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let query = deps.get_state_ref::<EmployeeTableQuery>();
        let list = deps.get_compute_ref::<EmployeeListCompute>();
        updater.set(derive_view(&list.employees, query));
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
