//! Contacts API Server module
//!
//! Provides an HTTP REST API over the address book.
//! Run with `contacts serve` or `contacts-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState, SERVER_LOG_FILTER};
