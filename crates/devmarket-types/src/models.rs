use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity, as resolved by the backend's `GET /me`.
/// This client only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// A freelancer-offered service listing. Created via form submission,
/// never mutated client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gig {
    pub id: Uuid,
    pub freelancer_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub delivery_days: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Order status as reported by the backend. Transitions are exclusively
/// server-driven; the client requests one and re-reads the result.
///
/// The backend may emit statuses this client does not know about, so the
/// enum carries an `Other` catch-all that round-trips the raw string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    PendingPayment,
    PaymentSubmitted,
    PaymentConfirmed,
    InProgress,
    Submitted,
    Completed,
    RevisionRequested,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::PendingPayment => "PENDING_PAYMENT",
            Self::PaymentSubmitted => "PAYMENT_SUBMITTED",
            Self::PaymentConfirmed => "PAYMENT_CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Submitted => "SUBMITTED",
            Self::Completed => "COMPLETED",
            Self::RevisionRequested => "REVISION_REQUESTED",
            Self::Cancelled => "CANCELLED",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING_PAYMENT" => Self::PendingPayment,
            "PAYMENT_SUBMITTED" => Self::PaymentSubmitted,
            "PAYMENT_CONFIRMED" => Self::PaymentConfirmed,
            "IN_PROGRESS" => Self::InProgress,
            "SUBMITTED" => Self::Submitted,
            "COMPLETED" => Self::Completed,
            "REVISION_REQUESTED" => Self::RevisionRequested,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An instance of a client purchasing a gig, tracked through a fixed
/// status progression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A direct message between two users. Append-only, ordered by creation
/// time on the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub order_id: Option<Uuid>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A write-once review left against a completed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub order_id: Uuid,
    #[serde(default)]
    pub reviewer_id: Option<Uuid>,
    #[serde(default)]
    pub reviewee_id: Option<Uuid>,
    pub rating: u8,
    pub comment: String,
}

/// The backend serializes timestamps from naive UTC datetimes, so plain
/// RFC 3339 parsing fails on them. Accept both forms.
pub mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse::<DateTime<Utc>>()
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
            })
            .map_err(|e| D::Error::custom(format!("bad timestamp '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_unknown_values() {
        let status = OrderStatus::from("ON_HOLD".to_string());
        assert_eq!(status, OrderStatus::Other("ON_HOLD".into()));
        assert_eq!(String::from(status), "ON_HOLD");
    }

    #[test]
    fn order_deserializes_naive_backend_timestamp() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "6f0a7b9c-0d4e-4f2a-8a9b-1c2d3e4f5a6b",
                "gig_id": "6f0a7b9c-0d4e-4f2a-8a9b-1c2d3e4f5a6c",
                "client_id": "6f0a7b9c-0d4e-4f2a-8a9b-1c2d3e4f5a6d",
                "freelancer_id": "6f0a7b9c-0d4e-4f2a-8a9b-1c2d3e4f5a6e",
                "status": "PENDING_PAYMENT",
                "payment_status": "pending",
                "created_at": "2024-03-01T10:30:00.123456"
            }"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.created_at.to_rfc3339(), "2024-03-01T10:30:00.123456+00:00");
    }
}
