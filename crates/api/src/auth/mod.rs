//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation, plus generation for tooling and tests.

pub mod jwt;
