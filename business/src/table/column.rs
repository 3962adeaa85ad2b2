use std::borrow::Cow;

use crate::employee::Employee;

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmployeeColumn {
    EmployeeId,
    Name,
    Manager,
    Salary,
}

impl EmployeeColumn {
    pub const ALL: [Self; 4] = [Self::EmployeeId, Self::Name, Self::Manager, Self::Salary];

    pub fn header(self) -> &'static str {
        match self {
            Self::EmployeeId => "EmployeeId",
            Self::Name => "Name",
            Self::Manager => "Manager",
            Self::Salary => "Salary",
        }
    }

    /// Cell text, also what filtering and sorting look at.
    pub fn cell_text(self, employee: &Employee) -> Cow<'_, str> {
        match self {
            Self::EmployeeId => Cow::Owned(employee.id_text()),
            Self::Name => Cow::Borrowed(&employee.name),
            Self::Manager => Cow::Borrowed(&employee.manager),
            Self::Salary => Cow::Borrowed(&employee.salary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_follow_columns() {
        let employee = Employee::new(12, "Alice", "Bob", "50000");
        let cells: Vec<_> = EmployeeColumn::ALL
            .iter()
            .map(|column| column.cell_text(&employee).into_owned())
            .collect();
        assert_eq!(cells, ["12", "Alice", "Bob", "50000"]);
    }

    #[test]
    fn headers_follow_columns() {
        let headers: Vec<_> = EmployeeColumn::ALL.map(EmployeeColumn::header).to_vec();
        assert_eq!(headers, ["EmployeeId", "Name", "Manager", "Salary"]);
    }
}
