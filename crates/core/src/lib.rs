//! CardVault Core - Shared types library.
//!
//! This crate provides common types used across all CardVault components:
//! - `admin` - Internal administration console for the marketplace
//! - `cli` - Command-line tools for snapshot seeding and validation
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Entity
//! records mirror the upstream marketplace API's JSON shapes and stay
//! permissive on optional fields: the only hard invariant is that every
//! record carries an `id`.
//!
//! # Modules
//!
//! - [`entities`] - Typed entity records and their status enumerations
//! - [`kind`] - The registry of entity collections behind the CRUD facade
//! - [`badge`] - Pure status-string to display-tone mapping

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod badge;
pub mod entities;
pub mod kind;

pub use badge::{Tone, badge_label, badge_tone};
pub use entities::*;
pub use kind::EntityKind;
