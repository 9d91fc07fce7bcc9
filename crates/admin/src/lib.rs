//! CardVault Console - Internal administration panel.
//!
//! Server-rendered back office for the CardVault trading-card
//! marketplace. Every page is an Axum handler that fetches entity
//! records through the marketplace API client, runs them through the
//! shared data table component, and renders an Askama template.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Askama templates for server-side rendering
//! - Marketplace REST API (or local JSON snapshots) for entity data
//! - Short-TTL per-entity list cache, invalidated on every mutation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod filters;
pub mod nav;
pub mod routes;
pub mod state;
