//! Interaction layer: remote generation service client.
//!
//! Implements [`triage_core::generation::GenerationBackend`] against
//! the external text-generation REST API and handles credential
//! loading.

pub mod config;
pub mod remote_client;

pub use remote_client::RemoteGenerationClient;
