pub mod config;
pub mod employee;
pub mod error;

pub use config::Config;
pub use employee::*;
pub use error::*;
