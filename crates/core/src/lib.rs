//! Core library for hudumcp
//!
//! This crate implements the **Functional Core** of the hudumcp application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The hudumcp project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`hudumcp_core`** (this crate): Pure transformation functions with zero I/O
//! - **`hudumcp`**: HTTP calls to Hudu, MCP transports and the CLI (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no logging, no environment lookups
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! Configuration such as the Hudu base URL is always passed in as a parameter.
//!
//! # Module Organization
//!
//! - [`assets`]: Typed view over Hudu asset records and response envelopes
//! - [`envelope`]: The double-encoded MCP tool result wrapper
//! - [`error`]: The error taxonomy shared by the core and the shell
//! - [`fetch`]: Expanding one asset into a full fetch document
//! - [`sanitize`]: Cleaning caller supplied search text
//! - [`search`]: Mapping asset lists into compact search results
//! - [`urls`]: Deriving API and site URLs from the configured base URL
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use hudumcp_core::assets::extract_assets;
//! use hudumcp_core::search::{transform_search_results, TitlePolicy};
//!
//! let payload = serde_json::json!({
//!     "assets": [{"id": 12, "name": "Emily", "url": "https://x/a/emily"}]
//! });
//!
//! let list = extract_assets(&payload);
//! let output = transform_search_results(&list.records, TitlePolicy::Plain);
//!
//! assert_eq!(output.results.len(), 1);
//! assert_eq!(output.results[0].id, "12");
//! ```

pub mod assets;
pub mod envelope;
pub mod error;
pub mod fetch;
pub mod sanitize;
pub mod search;
pub mod urls;
