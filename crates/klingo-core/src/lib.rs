//! # klingo-core
//!
//! Core types and utilities for talking to the Klingo practice-management
//! platform.
//!
//! Klingo exposes almost its entire surface through a single generic query
//! endpoint ("AQL"): a POST carrying a list of named, parameterized queries,
//! answered with a JSON object keyed by each query's caller-chosen alias.
//! This crate holds the protocol-level pieces shared by the client crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types shared across the workspace
//! - [`aql`] - Query descriptors, routing hints, response unwrapping and
//!   in-body error classification
//! - [`config`] - Configuration for client instances
//! - [`query`] - URL query-pair builder used for request-level hints

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod aql;
pub mod config;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use aql::{classify_body, unwrap_alias, AqlRequest, QueryDescriptor, RoutingHints};
pub use error::{Error, Result};
