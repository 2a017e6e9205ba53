//! Domain-focused API endpoint modules.

mod employees;
mod health;


pub use employees::add_employee;
pub use health::health;
