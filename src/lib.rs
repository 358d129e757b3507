//! # NSE XML API - Gateway Command Client
//!
//! A client library for controlling a network-access-control appliance
//! (an NSE gateway) over its HTTP-transported, XML-encoded command
//! protocol. Callers build typed commands (subscriber authorization,
//! RADIUS login/logout, bandwidth control, PMS billing, cache update),
//! the library validates and serializes them into the device's strict
//! XML wire format, POSTs them over HTTP, and parses the XML response
//! into either a success payload or a structured device error.
//!
//! ## Architecture
//!
//! The protocol splits cleanly into a synchronous core and an async edge:
//!
//! | Layer | Module | Role |
//! |-------|--------|------|
//! | Value types | [`value`] | Self-validating wire primitives |
//! | Schemas | [`schema`], [`commands`] | Declarative per-command field specs |
//! | Engine | [`command`] | Field binding, validation, XML serialization |
//! | Interpreter | [`response`] | Envelope parsing, device-error mapping |
//! | Transport | [`client`] | HTTP POST to the device endpoint |
//!
//! Schemas are `'static` read-only data and safe to share across threads;
//! a [`Command`] is a short-lived single-writer builder consumed by one
//! serialization.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nse_xmlapi::{Command, NseClient, NseResult};
//! use nse_xmlapi::commands::RADIUS_LOGIN;
//!
//! #[tokio::main]
//! async fn main() -> NseResult<()> {
//!     let mut client = NseClient::new("10.0.0.1");
//!     client.open()?;
//!
//!     let mut login = Command::new(&RADIUS_LOGIN)
//!         .set("SUB_USER_NAME", "alice")
//!         .set("SUB_PASSWORD", "secret")
//!         .set("SUB_MAC_ADDR", "00:1A:2B:3C:4D:5E");
//!     let response = client.execute(&mut login).await?;
//!     println!("logged in: {:?}", response.attributes);
//!
//!     client.close();
//!     Ok(())
//! }
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Core error types and result handling
pub mod error;

/// NSE XML protocol constants and the device error table
pub mod constants;

/// Self-validating wire-format value types
pub mod value;

/// Declarative command schema definitions
pub mod schema;

/// Command engine: binding, validation, serialization
pub mod command;

/// Response envelope parsing and device-error extraction
pub mod response;

/// Command catalogs: one schema per NSE command type
pub mod commands;

/// HTTP device client
pub mod client;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Async runtime (users can use nse_xmlapi::tokio) ===
pub use tokio;

// === Core client API ===
pub use client::NseClient;
pub use command::Command;
pub use response::{Response, ResponseElement};

// === Error handling ===
pub use error::{NseError, NseResult};

// === Value types ===
pub use value::{FieldValue, MacAddress, Text, ValueError, ValueKind};

// === Schema building blocks (for out-of-catalog command types) ===
pub use schema::{CommandSchema, FieldSpec, NamedField, TypedField};

// === Commonly needed constants ===
pub use constants::{COMMAND_PATH, DEFAULT_PORT, ROOT_TAG};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
