pub mod auth;
mod draft;
mod employee;
mod error;
mod format;
mod query;

pub use draft::{EmployeeDraft, FormError, date_input_value, parse_date_input};
pub use employee::{EmergencyContact, Employee, EmployeePage, EmployeePayload, EmployeeStatus};
pub use error::{Error, ErrorBody, Result};
pub use format::{format_hire_date, format_salary};
pub use query::{EmployeeQuery, PAGE_SIZE};
