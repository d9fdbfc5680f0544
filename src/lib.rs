//! `OwnIncome` - a personal finance record-keeper
//!
//! This crate tracks users, expense categories, expenses, income sources and
//! incomes in a local `SQLite` file, exposing a typed create/read/update/delete
//! layer plus a fixed seed-and-report sequence that prints every table to
//! stdout.

// Deny the most critical lints that could lead to bugs or security issues
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
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,
    clippy::all,
    clippy::inefficient_to_string,
    clippy::dbg_macro,
    clippy::semicolon_if_nothing_returned,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
)]

/// Configuration management for the database path
pub mod config;
/// Data-access layer - connection handling, schema, and per-table CRUD
pub mod db;
/// The fixed seed-and-report sequence exercising the data-access layer
pub mod demo;
/// Unified error types and result handling
pub mod errors;
/// Plain record structs mirroring the five tables
pub mod models;
/// Report rendering - builds output lines, callers decide where they go
pub mod report;
