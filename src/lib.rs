//! `backup-console` - Administrative console for managed backup/sync operations
//!
//! This crate manages the entities behind a fleet of backup agents: client
//! companies, their servers, scheduled rclone jobs, ad-hoc command dispatch,
//! a reusable command playbook, and paginated backup-run logs. All state
//! lives in a hosted relational backend reached over HTTPS; this crate is
//! the typed access layer, the per-screen state containers, and a thin CLI
//! shell. Cron dispatch and remote-copy execution happen on external agents
//! that poll the backend tables.

#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    clippy::all,
    clippy::inefficient_to_string,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::float_cmp,
    clippy::todo,
    clippy::unimplemented,
    clippy::semicolon_if_nothing_returned,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    async_fn_in_trait,                // Gateway trait is consumed via generics only
)]

/// Session/auth service - current user, persisted session, route guard
pub mod auth;
/// Configuration loading for the backend endpoint and session storage
pub mod config;
/// Unified error types and result handling
pub mod errors;
/// Presentation-only formatting helpers (CNPJ, truncation, file sizes)
pub mod format;
/// Data-access gateway over the hosted relational backend
pub mod gateway;
/// Wire entities and payload types for all backend tables
pub mod models;
/// Per-screen state containers (list/form state machines)
pub mod screens;

#[cfg(test)]
pub mod test_utils;
