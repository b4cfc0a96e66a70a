//! # bookshelf
//!
//! A small catalogue of rated books. Books live in SQLite and are served as
//! server-rendered HTML through axum.
//!
//! Adding a book and changing its rating both go through the rules in
//! [`validation`]; the [`catalog`] module ties those rules to the store.

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod pending;
pub mod telemetry;
pub mod validation;
pub mod web;
