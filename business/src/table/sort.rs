//! Column sorting.
//!
//! Cells compare "alphanumerically": runs of ASCII digits compare by numeric
//! value, everything else compares as text. So `"9000" < "50000"` and
//! `"emp2" < "emp10"`.

use std::cmp::Ordering;

use super::EmployeeColumn;
use crate::employee::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header suffix for the active column.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => " ▲",
            Self::Descending => " ▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortBy {
    pub column: EmployeeColumn,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn ascending(column: EmployeeColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: EmployeeColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        let ordering = compare_alphanumeric(&self.column.cell_text(a), &self.column.cell_text(b));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Header click cycle: unsorted -> ascending -> descending -> unsorted.
///
/// Clicking a different column starts that column at ascending.
pub fn next_sort(current: Option<SortBy>, column: EmployeeColumn) -> Option<SortBy> {
    match current {
        Some(sort) if sort.column == column => match sort.direction {
            SortDirection::Ascending => Some(SortBy::descending(column)),
            SortDirection::Descending => None,
        },
        _ => Some(SortBy::ascending(column)),
    }
}

/// Stable sort of `rows` in place.
pub fn sort_rows(rows: &mut [&Employee], sort: Option<SortBy>) {
    if let Some(sort) = sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Chunk::Digits(head)
        } else {
            Chunk::Text(head)
        })
    }
}

pub fn compare_alphanumeric(a: &str, b: &str) -> Ordering {
    let mut left = Chunks { rest: a };
    let mut right = Chunks { rest: b };
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => compare_chunk(l, r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn compare_chunk(left: Chunk<'_>, right: Chunk<'_>) -> Ordering {
    match (left, right) {
        (Chunk::Digits(l), Chunk::Digits(r)) => compare_digits(l, r),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        (Chunk::Text(l), Chunk::Text(r)) => l
            .to_lowercase()
            .cmp(&r.to_lowercase())
            .then_with(|| l.cmp(r)),
    }
}

/// Numeric comparison of arbitrarily long digit runs.
fn compare_digits(left: &str, right: &str) -> Ordering {
    let l = left.trim_start_matches('0');
    let r = right.trim_start_matches('0');
    l.len()
        .cmp(&r.len())
        .then_with(|| l.cmp(r))
        .then_with(|| left.len().cmp(&right.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_runs_compare_numerically() {
        assert_eq!(compare_alphanumeric("9000", "50000"), Ordering::Less);
        assert_eq!(compare_alphanumeric("emp2", "emp10"), Ordering::Less);
        assert_eq!(compare_alphanumeric("10", "10"), Ordering::Equal);
        assert_eq!(
            compare_alphanumeric("123456789012345678901234567890", "99"),
            Ordering::Greater
        );
    }

    #[test]
    fn text_ignores_case_first() {
        assert_eq!(compare_alphanumeric("alice", "Bob"), Ordering::Less);
        assert_eq!(compare_alphanumeric("Bob", "bob"), Ordering::Less);
        assert_eq!(compare_alphanumeric("", "a"), Ordering::Less);
    }

    #[test]
    fn numbers_sort_before_words() {
        assert_eq!(compare_alphanumeric("42", "abc"), Ordering::Less);
        assert_eq!(compare_alphanumeric("x1", "x"), Ordering::Greater);
    }

    #[test]
    fn click_cycle() {
        let name = EmployeeColumn::Name;
        let asc = next_sort(None, name);
        assert_eq!(asc, Some(SortBy::ascending(name)));
        let desc = next_sort(asc, name);
        assert_eq!(desc, Some(SortBy::descending(name)));
        assert_eq!(next_sort(desc, name), None);
        assert_eq!(
            next_sort(desc, EmployeeColumn::Salary),
            Some(SortBy::ascending(EmployeeColumn::Salary))
        );
    }

    #[test]
    fn sort_rows_is_stable() {
        let a = Employee::new(1, "Ann", "Zoe", "100");
        let b = Employee::new(2, "Ben", "Amy", "100");
        let c = Employee::new(3, "Cat", "Amy", "9");
        let mut rows = vec![&a, &b, &c];

        sort_rows(&mut rows, Some(SortBy::ascending(EmployeeColumn::Salary)));
        assert_eq!(rows, vec![&c, &a, &b]);

        sort_rows(&mut rows, Some(SortBy::descending(EmployeeColumn::Manager)));
        assert_eq!(rows, vec![&a, &c, &b]);

        sort_rows(&mut rows, None);
        assert_eq!(rows, vec![&a, &c, &b]);
    }
}
