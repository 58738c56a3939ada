//! Infrastructure layer: persistence collaborator for the triage
//! engine.
//!
//! Provides the directory-backed [`DirSessionRepository`] and the DTO
//! layer that isolates the on-disk schema from the domain model.

pub mod dir_session_repository;
pub mod dto;

pub use dir_session_repository::DirSessionRepository;
