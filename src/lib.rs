//! Admin dashboard for tasks and users stored behind a mock REST API.
//!
//! The library holds everything but the process entry point: the HTTP
//! client, resource stores, pure list helpers, export, and both the
//! terminal dashboard and the scripted command surface.

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod export;
pub mod forms;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod notify;
pub mod query;
pub mod stats;
pub mod store;
pub mod ui;
