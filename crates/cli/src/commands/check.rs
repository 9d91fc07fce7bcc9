//! Validate snapshot files against the typed entity model.

use std::path::Path;

use serde_json::Value;
use tracing::{error, info, warn};

use cardvault_core::EntityKind;
use cardvault_core::entities::{
    AdminLog, Announcement, CardCategory, Dispute, FraudAlert, Listing, Order, Payment, Payout,
    PlatformSetting, Seller, SupportTicket, User,
};

/// Validate every snapshot file in `dir`.
///
/// Missing files are reported but not fatal; parse failures are.
///
/// # Errors
///
/// Returns an error when any present snapshot fails validation.
pub async fn run(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut checked = 0usize;
    let mut missing = 0usize;
    let mut failures = Vec::new();

    for kind in EntityKind::ALL {
        let path = dir.join(kind.snapshot_file());
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file = %path.display(), "snapshot missing");
                missing += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match validate(kind, &bytes) {
            Ok(count) => {
                info!(entity = kind.name(), records = count, "ok");
                checked += 1;
            }
            Err(e) => {
                error!(entity = kind.name(), "invalid: {e}");
                failures.push(kind.name());
            }
        }
    }

    info!(checked, missing, failed = failures.len(), "check complete");
    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("invalid snapshots: {}", failures.join(", ")).into())
    }
}

/// Parse one snapshot body into its typed model and return the record count.
fn validate(kind: EntityKind, bytes: &[u8]) -> Result<usize, serde_json::Error> {
    fn typed<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<usize, serde_json::Error> {
        serde_json::from_slice::<Vec<T>>(bytes).map(|records| records.len())
    }

    // Every record must also carry a non-empty id; the typed model defaults
    // missing ids to empty strings, so check the raw values too.
    let raw: Vec<Value> = serde_json::from_slice(bytes)?;
    for record in &raw {
        let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
        if id.is_empty() {
            return Err(serde::de::Error::custom("record missing id"));
        }
    }

    match kind {
        EntityKind::User => typed::<User>(bytes),
        EntityKind::Seller => typed::<Seller>(bytes),
        EntityKind::Listing => typed::<Listing>(bytes),
        EntityKind::Order => typed::<Order>(bytes),
        EntityKind::Payment => typed::<Payment>(bytes),
        EntityKind::Payout => typed::<Payout>(bytes),
        EntityKind::Dispute => typed::<Dispute>(bytes),
        EntityKind::FraudAlert => typed::<FraudAlert>(bytes),
        EntityKind::Announcement => typed::<Announcement>(bytes),
        EntityKind::SupportTicket => typed::<SupportTicket>(bytes),
        EntityKind::AdminLog => typed::<AdminLog>(bytes),
        EntityKind::CardCategory => typed::<CardCategory>(bytes),
        EntityKind::PlatformSetting => typed::<PlatformSetting>(bytes),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_seeded_shapes() {
        let body = br#"[{"id": "u1", "email": "a@b.c", "role": "admin"}]"#;
        assert_eq!(validate(EntityKind::User, body).unwrap(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_enum_value() {
        let body = br#"[{"id": "d1", "type": "teleported", "status": "open"}]"#;
        assert!(validate(EntityKind::Dispute, body).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_id() {
        let body = br#"[{"email": "a@b.c"}]"#;
        assert!(validate(EntityKind::User, body).is_err());
    }

    #[tokio::test]
    async fn test_check_passes_on_seeded_directory() {
        let dir = tempfile::tempdir().unwrap();
        super::super::seed::run(dir.path(), false).await.unwrap();
        run(dir.path()).await.unwrap();
    }
}
