//! Order-status view-model: maps a backend status to a position on the
//! four-step visual progression and to the action offered to the viewer.
//!
//! Status transitions themselves live in the backend. Everything here is a
//! pure projection of `(status, role)` and is exercised by the order detail
//! view.

use uuid::Uuid;

use devmarket_types::models::{Order, OrderStatus};

/// The fixed four-step progression shown on the order detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Paid,
    Working,
    Review,
    Completed,
}

pub const STEPS: [Step; 4] = [Step::Paid, Step::Working, Step::Review, Step::Completed];

/// Index of the last step; unmatched statuses land here.
const TERMINAL_STEP: usize = STEPS.len() - 1;

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Working => "Working",
            Self::Review => "Review",
            Self::Completed => "Completed",
        }
    }

    /// The status keying this step in the progression table.
    fn status_key(self) -> OrderStatus {
        match self {
            Self::Paid => OrderStatus::PendingPayment,
            Self::Working => OrderStatus::PaymentConfirmed,
            Self::Review => OrderStatus::Submitted,
            Self::Completed => OrderStatus::Completed,
        }
    }
}

/// Find the status in the four-step table by exact match. If absent,
/// PAYMENT_SUBMITTED maps to step 0 and everything else to the terminal
/// step.
///
/// The PAYMENT_SUBMITTED fallback makes it visually indistinguishable from
/// PENDING_PAYMENT even though the backend treats them as distinct states.
/// That inconsistency is part of the existing contract and is preserved
/// here, not corrected.
pub fn step_index(status: &OrderStatus) -> usize {
    STEPS
        .iter()
        .position(|step| step.status_key() == *status)
        .unwrap_or(match status {
            OrderStatus::PaymentSubmitted => 0,
            _ => TERMINAL_STEP,
        })
}

/// The viewer's role relative to an order, derived by identity comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Freelancer,
    /// Neither participant; sees the order read-only.
    Observer,
}

pub fn role_for(viewer_id: Uuid, order: &Order) -> Role {
    if viewer_id == order.client_id {
        Role::Client
    } else if viewer_id == order.freelancer_id {
        Role::Freelancer
    } else {
        Role::Observer
    }
}

/// Actions the order detail view can offer. Each transition action issues
/// exactly one PATCH and is followed by an unconditional re-fetch of the
/// order; `LeaveReview` navigates to the review form instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    SubmitPayment,
    ConfirmPayment,
    SubmitWork,
    Approve,
    RequestRevision,
    LeaveReview,
}

impl OrderAction {
    /// Path segment of the transition endpoint, or `None` for actions that
    /// navigate rather than PATCH.
    pub fn transition_segment(self) -> Option<&'static str> {
        match self {
            Self::SubmitPayment => Some("submit-payment"),
            Self::ConfirmPayment => Some("confirm-payment"),
            Self::SubmitWork => Some("submit-work"),
            Self::Approve => Some("approve"),
            Self::RequestRevision => Some("revision"),
            Self::LeaveReview => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SubmitPayment => "Submit payment proof",
            Self::ConfirmPayment => "Verify & start working",
            Self::SubmitWork => "Submit completed work",
            Self::Approve => "Approve & complete",
            Self::RequestRevision => "Request revision",
            Self::LeaveReview => "Leave a review",
        }
    }
}

/// The role-gated action table. One status/role cell is enabled at a time;
/// SUBMITTED offers the client a single choice point between approving and
/// requesting a revision. Every other combination, and the Observer role,
/// gets nothing.
pub fn available_actions(status: &OrderStatus, role: Role) -> &'static [OrderAction] {
    match (status, role) {
        (OrderStatus::PendingPayment, Role::Client) => &[OrderAction::SubmitPayment],
        (OrderStatus::PaymentSubmitted, Role::Freelancer) => &[OrderAction::ConfirmPayment],
        (OrderStatus::PaymentConfirmed, Role::Freelancer) => &[OrderAction::SubmitWork],
        (OrderStatus::Submitted, Role::Client) => {
            &[OrderAction::Approve, OrderAction::RequestRevision]
        }
        (OrderStatus::Completed, Role::Client) => &[OrderAction::LeaveReview],
        _ => &[],
    }
}
