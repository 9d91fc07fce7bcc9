//! TCG categories and their card sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card set within a category (e.g. "Base Set" / "BS" under Pokemon).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardSet {
    pub name: String,
    pub code: String,
}

/// A trading-card game category (Pokemon, MTG, Yu-Gi-Oh, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub is_active: bool,
    pub sets: Vec<CardSet>,
    pub created_date: Option<DateTime<Utc>>,
}
