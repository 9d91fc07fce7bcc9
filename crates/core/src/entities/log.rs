//! Audit trail of admin actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded admin action against an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdminLog {
    pub id: String,
    pub action: String,
    pub admin_email: String,
    pub entity_type: String,
    pub entity_id: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
}
