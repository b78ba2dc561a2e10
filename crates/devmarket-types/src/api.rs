use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Errors --

/// Shape of the backend's JSON error body. Only `detail` is read; every
/// other field is ignored.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

// -- Gigs --

#[derive(Debug, Clone, Serialize)]
pub struct GigCreate {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub delivery_days: u32,
}

// -- Orders --

#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub gig_id: Uuid,
}

/// Client-submitted claim of an out-of-band payment, awaiting freelancer
/// confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentProofCreate {
    pub proof_reference: String,
    pub payer_name: String,
    pub amount: f64,
}

// -- Messages --

#[derive(Debug, Clone, Serialize)]
pub struct MessageCreate {
    pub receiver_id: Uuid,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
}

// -- Reviews --

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCreate {
    pub order_id: Uuid,
    pub rating: u8,
    pub comment: String,
}
