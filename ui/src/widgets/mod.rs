mod employees;
mod toolbar;

pub use employees::{
    delete_dialog, employee_form, employee_panel, employee_table, pagination, search_box,
    status_line,
};
pub use toolbar::toolbar;
