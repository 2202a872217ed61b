//! # Medcat Architecture
//!
//! Medcat is a **UI-agnostic client library** for a medication-catalog API,
//! with a CLI binary wired on top. The server owns all persistent state,
//! validation, and search; this crate renders that state, collects edits,
//! and forwards them over HTTP.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs)                              │
//! │  - Parses arguments, formats output, prompts, $EDITOR       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic per operation                             │
//! │  - No I/O assumptions beyond the ports it is handed         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Ports (remote/, session.rs)                                │
//! │  - RemoteStore: the API server (HttpStore / InMemoryStore)  │
//! │  - TokenStore: session token persistence                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two pieces carry most of the behavior and sit outside the dispatch
//! chain as pure components:
//!
//! - [`browse`]: the paginated/search listing controller and its
//!   debounce timer. Pure state: callers run the fetches it plans.
//! - [`leaflet`]: the markdown adapter that presents a leaflet section
//!   (an ordered list of paragraphs) as an editable document and converts
//!   edits back. The round trip is documented as lossy.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never calls
//! `std::process::exit`, and never assumes a terminal. The CLI is one
//! client of the library; a TUI or a test harness is another.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`remote`]: The API-server port and its implementations
//! - [`browse`]: List/search controller and debouncer
//! - [`leaflet`]: Section markdown adapter
//! - [`model`]: Wire/data types (`MedicineSummary`, `LeafletData`, ...)
//! - [`session`]: Session value and token storage port
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod browse;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod leaflet;
pub mod model;
pub mod remote;
pub mod session;
