//! Pure domain logic for the Pingboard service.
//!
//! Nothing in this crate touches the database or the network; callers pass
//! data in and get values back, which keeps every function unit-testable.

pub mod category_name;
pub mod color;
pub mod error;
pub mod field_set;
pub mod pagination;
pub mod time_window;
pub mod types;
