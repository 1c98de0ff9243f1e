pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Employee, EmployeeRequest, EmploymentStatus};
pub use repositories::EmployeeRepository;
pub use services::EmployeeService;
