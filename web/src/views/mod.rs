mod components;
mod new_password;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod reset_password;
pub use reset_password::ResetPassword;

mod dashboard;
pub use dashboard::Dashboard;

mod employee_form;

mod employees;
pub use employees::Employees;
