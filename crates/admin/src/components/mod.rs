//! Reusable view components shared across console pages.

pub mod cards;
pub mod data_table;
