//! Seed a snapshot directory with sample entity data.
//!
//! The console reads `{Entity}s.json` files in snapshot mode; this command
//! writes a small consistent data set so every page has something to show.

use std::path::Path;

use serde_json::{Value, json};
use tracing::info;

use cardvault_core::EntityKind;

/// Write sample snapshots for every entity collection.
///
/// Existing files are left alone unless `force` is set.
///
/// # Errors
///
/// Returns an error when the directory cannot be created or a file write
/// fails.
pub async fn run(dir: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for kind in EntityKind::ALL {
        let path = dir.join(kind.snapshot_file());
        if path.exists() && !force {
            info!(file = %path.display(), "exists, skipping (use --force to overwrite)");
            skipped += 1;
            continue;
        }
        let records = sample_records(kind);
        let body = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(&path, body).await?;
        info!(file = %path.display(), records = records.len(), "wrote snapshot");
        written += 1;
    }

    info!(written, skipped, "seeding complete");
    Ok(())
}

/// Sample records for one collection. Cross-references (emails, order ids)
/// are consistent across collections so joins on the console line up.
#[allow(clippy::too_many_lines)]
fn sample_records(kind: EntityKind) -> Vec<Value> {
    match kind {
        EntityKind::User => vec![
            json!({"id": "user-1", "email": "admin@cardvault.io", "full_name": "Ava Admin",
                   "role": "admin", "created_date": "2023-11-01T09:00:00Z"}),
            json!({"id": "user-2", "email": "mika@collectors.example", "full_name": "Mika Tanaka",
                   "role": "user", "created_date": "2024-01-15T14:20:00Z"}),
            json!({"id": "user-3", "email": "sam@cardshop.example", "full_name": "Sam Rivera",
                   "role": "user", "created_date": "2024-02-07T08:45:00Z"}),
        ],
        EntityKind::Seller => vec![
            json!({"id": "seller-1", "user_email": "sam@cardshop.example",
                   "business_name": "Rivera Rare Cards", "verification_status": "pending",
                   "risk_level": "low", "total_sales": 4820.75, "rating": 4.8,
                   "kyc_documents": [
                       {"document_type": "Government ID", "file_url": "https://files.cardvault.io/kyc/sam-id.pdf",
                        "uploaded_date": "2024-02-08T10:00:00Z"},
                       {"document_type": "Proof of Address", "file_url": "https://files.cardvault.io/kyc/sam-address.pdf",
                        "uploaded_date": "2024-02-08T10:05:00Z"}
                   ],
                   "created_date": "2024-02-08T09:00:00Z"}),
            json!({"id": "seller-2", "user_email": "mika@collectors.example",
                   "business_name": "Tanaka Trading", "verification_status": "approved",
                   "risk_level": "high", "total_sales": 18240.00,
                   "created_date": "2024-01-20T11:00:00Z"}),
        ],
        EntityKind::Listing => vec![
            json!({"id": "listing-1", "card_name": "Charizard Holo", "card_set": "Base Set",
                   "tcg_category": "pokemon", "price": 450.00, "market_price": 475.00,
                   "condition": "near_mint", "quantity": 1, "seller_email": "sam@cardshop.example",
                   "status": "pending", "created_date": "2024-03-01T12:00:00Z"}),
            json!({"id": "listing-2", "card_name": "Black Lotus", "card_set": "Unlimited",
                   "tcg_category": "mtg", "price": 8200.00, "market_price": 8500.00,
                   "condition": "played", "quantity": 1, "seller_email": "mika@collectors.example",
                   "status": "approved", "created_date": "2024-02-25T16:30:00Z"}),
            json!({"id": "listing-3", "card_name": "Blue-Eyes White Dragon", "card_set": "LOB",
                   "tcg_category": "yugioh", "price": 320.00, "market_price": 150.00,
                   "condition": "near_mint", "quantity": 2, "seller_email": "mika@collectors.example",
                   "status": "approved", "is_flagged": true, "flag_reason": "Price far above market",
                   "created_date": "2024-03-03T10:10:00Z"}),
        ],
        EntityKind::Order => vec![
            json!({"id": "order-1", "order_number": "ORD-2024-1001",
                   "buyer_email": "mika@collectors.example", "seller_email": "sam@cardshop.example",
                   "card_name": "Charizard Holo", "subtotal": 450.00, "shipping_cost": 8.50,
                   "platform_fee": 45.00, "total": 458.50, "status": "paid",
                   "created_date": "2024-03-04T09:30:00Z"}),
            json!({"id": "order-2", "order_number": "ORD-2024-1002",
                   "buyer_email": "sam@cardshop.example", "seller_email": "mika@collectors.example",
                   "card_name": "Black Lotus", "subtotal": 8200.00, "shipping_cost": 25.00,
                   "platform_fee": 820.00, "total": 8225.00, "status": "shipped",
                   "tracking_number": "1Z999AA10123456784", "shipping_carrier": "UPS",
                   "created_date": "2024-03-02T15:00:00Z"}),
        ],
        EntityKind::Payment => vec![
            json!({"id": "payment-1", "transaction_id": "txn_9f83ha", "order_id": "order-1",
                   "buyer_email": "mika@collectors.example", "amount": 458.50,
                   "payment_method": "card", "status": "captured", "fraud_score": 12,
                   "created_date": "2024-03-04T09:31:00Z"}),
            json!({"id": "payment-2", "transaction_id": "txn_k28dm1", "order_id": "order-2",
                   "buyer_email": "sam@cardshop.example", "amount": 8225.00,
                   "payment_method": "bank_transfer", "status": "authorized", "fraud_score": 64,
                   "is_flagged": true, "flag_reason": "High-value first purchase",
                   "created_date": "2024-03-02T15:01:00Z"}),
        ],
        EntityKind::Payout => vec![
            json!({"id": "payout-1", "seller_email": "sam@cardshop.example", "order_id": "order-1",
                   "amount": 458.50, "platform_fee": 45.00, "net_amount": 413.50,
                   "payout_method": "bank_transfer", "status": "pending",
                   "scheduled_date": "2024-03-08T00:00:00Z", "created_date": "2024-03-04T10:00:00Z"}),
            json!({"id": "payout-2", "seller_email": "mika@collectors.example", "order_id": "order-2",
                   "amount": 8225.00, "platform_fee": 820.00, "net_amount": 7405.00,
                   "payout_method": "bank_transfer", "status": "delayed",
                   "delay_reason": "Pending fraud review on payment",
                   "created_date": "2024-03-02T16:00:00Z"}),
        ],
        EntityKind::Dispute => vec![
            json!({"id": "dispute-1", "buyer_email": "mika@collectors.example",
                   "seller_email": "sam@cardshop.example", "order_id": "order-1",
                   "type": "item_not_as_described", "status": "open",
                   "description": "Card arrived with whitening on the back edges",
                   "evidence": [
                       {"submitted_by": "mika@collectors.example", "type": "photo",
                        "description": "Photo of the card back under light"}
                   ],
                   "created_date": "2024-03-09T13:00:00Z"}),
        ],
        EntityKind::FraudAlert => vec![
            json!({"id": "fraud-1", "alert_type": "price_anomaly", "severity": "high",
                   "user_email": "mika@collectors.example",
                   "description": "Listing priced 110% above market for 3 consecutive listings",
                   "status": "new", "related_entity_id": "listing-3",
                   "related_entity_type": "Listing", "created_date": "2024-03-03T10:12:00Z"}),
            json!({"id": "fraud-2", "alert_type": "multiple_accounts", "severity": "medium",
                   "user_email": "sam@cardshop.example", "ip_address": "203.0.113.9",
                   "description": "Two seller accounts sharing a device fingerprint",
                   "status": "investigating", "created_date": "2024-02-28T19:40:00Z"}),
        ],
        EntityKind::Announcement => vec![
            json!({"id": "ann-1", "title": "Grading partner launch",
                   "content": "PSA submissions now ship directly from our vault.",
                   "type": "update", "target_audience": "verified_sellers", "is_active": true,
                   "start_date": "2024-03-01T00:00:00Z", "created_date": "2024-02-27T09:00:00Z"}),
        ],
        EntityKind::SupportTicket => vec![
            json!({"id": "ticket-1", "subject": "Payout still delayed", "category": "payment",
                   "priority": "high", "status": "open", "user_email": "mika@collectors.example",
                   "messages": [
                       {"sender": "mika@collectors.example",
                        "content": "My payout has been delayed for a week now, can you check?",
                        "timestamp": "2024-03-10T08:00:00Z", "is_admin": false}
                   ],
                   "created_date": "2024-03-10T08:00:00Z"}),
        ],
        EntityKind::AdminLog => vec![
            json!({"id": "log-1", "action": "approve", "admin_email": "admin@cardvault.io",
                   "entity_type": "Seller", "entity_id": "seller-2",
                   "description": "Approved seller verification for Tanaka Trading",
                   "ip_address": "10.1.4.22", "created_date": "2024-01-21T10:15:00Z"}),
            json!({"id": "log-2", "action": "update", "admin_email": "admin@cardvault.io",
                   "entity_type": "PlatformSettings", "entity_id": "setting-1",
                   "description": "Changed marketplace_commission from 10 to 12.5",
                   "ip_address": "10.1.4.22", "created_date": "2024-02-14T11:05:00Z"}),
        ],
        EntityKind::CardCategory => vec![
            json!({"id": "cat-1", "name": "Pokemon", "slug": "pokemon",
                   "description": "Pokemon Trading Card Game", "is_active": true,
                   "sets": [{"name": "Base Set", "code": "BS"}, {"name": "Jungle", "code": "JU"}],
                   "created_date": "2023-10-01T00:00:00Z"}),
            json!({"id": "cat-2", "name": "Magic: The Gathering", "slug": "mtg",
                   "description": "Wizards of the Coast TCG", "is_active": true,
                   "sets": [{"name": "Unlimited", "code": "2ED"}],
                   "created_date": "2023-10-01T00:00:00Z"}),
        ],
        EntityKind::PlatformSetting => vec![
            json!({"id": "setting-1", "setting_key": "marketplace_commission",
                   "setting_value": "12.5", "setting_type": "fee",
                   "created_date": "2023-10-01T00:00:00Z"}),
            json!({"id": "setting-2", "setting_key": "fraud_detection_enabled",
                   "setting_value": "true", "setting_type": "feature_flag",
                   "created_date": "2023-10-01T00:00:00Z"}),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_collection_has_sample_data() {
        for kind in EntityKind::ALL {
            let records = sample_records(kind);
            assert!(!records.is_empty(), "{kind} has no samples");
            for record in &records {
                assert!(record.get("id").is_some(), "{kind} record missing id");
            }
        }
    }

    #[tokio::test]
    async fn test_seed_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("Users.json");
        std::fs::write(&users, "[]").unwrap();

        run(dir.path(), false).await.unwrap();
        assert_eq!(std::fs::read_to_string(&users).unwrap(), "[]");

        run(dir.path(), true).await.unwrap();
        assert_ne!(std::fs::read_to_string(&users).unwrap(), "[]");
    }
}
