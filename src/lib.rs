//! SAF Gateway: backend-for-frontend over the SAF test-management system
//!
//! The binary wires settings, logging and the HTTP server together. The
//! reshaping engine, provider client and HTTP boundary live in the
//! `safgate-core`, `safgate-client` and `safgate-api` crates.

pub mod cli;

pub use cli::{init_logging, Args, Error, Result, Settings};
