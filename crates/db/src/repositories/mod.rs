//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod event_repo;

pub use category_repo::CategoryRepo;
pub use event_repo::EventRepo;
