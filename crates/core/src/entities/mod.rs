//! Typed entity records for the marketplace collections.
//!
//! These structs mirror the JSON shapes served by the upstream API and the
//! static snapshots. Deserialization is deliberately permissive: every field
//! except `id` is defaulted, because the upstream enforces no schema beyond
//! "has an id". Status fields are closed enumerations on the wire
//! (snake_case strings).

mod announcement;
mod category;
mod dispute;
mod fraud;
mod listing;
mod log;
mod order;
mod payment;
mod payout;
mod seller;
mod setting;
mod ticket;
mod user;

pub use announcement::{Announcement, AnnouncementType, TargetAudience};
pub use category::{CardCategory, CardSet};
pub use dispute::{Dispute, DisputeEvidence, DisputeStatus, DisputeType};
pub use fraud::{AlertSeverity, AlertStatus, FraudAlert};
pub use listing::{Listing, ListingStatus};
pub use log::AdminLog;
pub use order::{Order, OrderStatus};
pub use payment::{Payment, PaymentStatus};
pub use payout::{Payout, PayoutStatus};
pub use seller::{KycDocument, RiskLevel, Seller, VerificationStatus};
pub use setting::{PlatformSetting, SettingType};
pub use ticket::{SupportTicket, TicketMessage, TicketPriority, TicketStatus};
pub use user::{User, UserRole};
