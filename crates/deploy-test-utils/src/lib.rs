//! Shared test utilities for the compose-deploy workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`git`]: local git repositories usable as clone sources
//! - [`repo`]: [`repo::TestRepo`] builder for working-copy trees

pub mod git;
pub mod repo;
