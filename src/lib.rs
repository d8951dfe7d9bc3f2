//! atlanop - companion CLI for the Atlan admin API
//!
//! The library half holds the paginated API client, the SSO mapping
//! diagnostic and the CLI handlers; `main.rs` only parses and dispatches.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod sso;
