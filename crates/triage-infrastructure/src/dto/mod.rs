//! Storage DTOs.

pub mod session;
