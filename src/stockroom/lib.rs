//! # Stockroom Architecture
//!
//! Stockroom is a small-business inventory library with two command-line
//! clients:
//!
//! - `stockroom`: products, safety items and labels (code, name, quantity)
//!   plus a chemical ledger that tracks density, volume, computed mass and
//!   expiry, all in one SQLite database.
//! - `stocklist`: a flat priced stock list kept in a single JSON file.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/stockroom/main.rs, src/stocklist/main.rs)   │
//! │  - Parses arguments, formats output, handles terminal I/O   │
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
//! │  - Input validation and business rules                      │
//! │  - Takes raw operator text, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - InventoryStore / CatalogStore traits                     │
//! │  - SqliteStore, JsonFileStore, in-memory test doubles       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never calls
//! `std::process::exit`. Diagnostics go through `tracing`; the binaries decide
//! where they end up (see [`logging`]).
//!
//! The current date is always an argument. Expiry checks take `today` from
//! the caller so they can be tested against fixed dates.
//!
//! ## Module Overview
//!
//! - [`api`]: The facades, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Record types and their partial updates
//! - [`units`]: Density unit conversion and mass
//! - [`expiry`]: Expiry classification and the alert scan
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod expiry;
pub mod init;
pub mod logging;
pub mod model;
pub mod store;
pub mod units;
