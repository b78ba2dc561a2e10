use devmarket_client::ApiClient;
use devmarket_client::orders::{OrderAction, Role, STEPS, available_actions, role_for, step_index};
use devmarket_types::api::PaymentProofCreate;
use devmarket_types::models::{Gig, Order, OrderStatus, User};
use uuid::Uuid;

use super::{Navigation, page_err};

/// Order detail: the four-step progress view plus the single role-gated
/// action for the current state. Every transition is a PATCH followed by
/// an unconditional re-fetch; the view never advances the stepper locally.
#[derive(Debug)]
pub struct OrderView {
    viewer: User,
    order: Order,
    gig: Gig,
    notice: Option<String>,
}

impl OrderView {
    pub async fn load(api: &ApiClient, viewer: &User, id: Uuid) -> Result<Self, String> {
        let (order, gig) = fetch(api, id).await?;
        Ok(Self {
            viewer: viewer.clone(),
            order,
            gig,
            notice: None,
        })
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn role(&self) -> Role {
        role_for(self.viewer.id, &self.order)
    }

    pub fn actions(&self) -> &'static [OrderAction] {
        available_actions(&self.order.status, self.role())
    }

    /// The other participant, for the "open chat" affordance.
    pub fn peer_id(&self) -> Uuid {
        if self.role() == Role::Client {
            self.order.freelancer_id
        } else {
            self.order.client_id
        }
    }

    /// Run one action. Transition actions PATCH then re-fetch; failures
    /// land in the notice line (the alert of this rendition) and the view
    /// stays put.
    pub async fn dispatch(
        &mut self,
        api: &ApiClient,
        action: OrderAction,
        proof: Option<PaymentProofCreate>,
    ) -> Result<Navigation, String> {
        if !self.actions().contains(&action) {
            return Err(format!(
                "{} is not available for this order right now",
                action.label()
            ));
        }

        let id = self.order.id;
        let result = match action {
            OrderAction::SubmitPayment => {
                let proof = proof.ok_or("payer name, reference and amount are required")?;
                api.submit_payment(id, &proof).await
            }
            OrderAction::ConfirmPayment => api.confirm_payment(id).await,
            OrderAction::SubmitWork => api.submit_work(id).await,
            OrderAction::Approve => api.approve(id).await,
            OrderAction::RequestRevision => api.request_revision(id).await,
            OrderAction::LeaveReview => return Ok(Navigation::ReviewForm(id)),
        };

        match result {
            Ok(_) => {
                // The transition response is discarded; the re-fetched
                // order is the only state this view trusts.
                let (order, gig) = fetch(api, id).await?;
                self.order = order;
                self.gig = gig;
                self.notice = None;
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
        Ok(Navigation::Stay)
    }

    pub fn render(&self) -> String {
        let current = step_index(&self.order.status);
        let role = self.role();

        let mut out = format!(
            "== Order Summary ==\n{}  (${:.2})\n\n",
            self.gig.title, self.gig.price
        );

        // Stepper
        let steps: Vec<String> = STEPS
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let marker = if idx <= current { "[x]" } else { "[ ]" };
                format!("{marker} {}", step.label())
            })
            .collect();
        out.push_str(&steps.join(" --- "));
        out.push('\n');

        if let Some(notice) = &self.notice {
            out.push_str(&format!("\n! {notice}\n"));
        }

        out.push('\n');
        out.push_str(&status_copy(&self.order.status, role));
        out.push('\n');

        let actions = self.actions();
        if !actions.is_empty() {
            out.push_str("\nAvailable:\n");
            for action in actions {
                out.push_str(&format!("  - {}\n", action.label()));
            }
        }
        out.push_str(&format!(
            "\n(type `messages {}` to talk to the other side)\n",
            self.peer_id()
        ));
        out
    }
}

async fn fetch(api: &ApiClient, id: Uuid) -> Result<(Order, Gig), String> {
    // The backend exposes the order list, not single-order reads; select
    // by id and report a miss as its own error.
    let orders = api.list_orders().await.map_err(page_err)?;
    let order = orders
        .into_iter()
        .find(|order| order.id == id)
        .ok_or_else(|| "Order not found".to_string())?;
    let gig = api.get_gig(order.gig_id).await.map_err(page_err)?;
    Ok((order, gig))
}

fn status_copy(status: &OrderStatus, role: Role) -> String {
    match (status, role) {
        (OrderStatus::PendingPayment, Role::Client) => {
            "Transfer the amount to the verified account, then submit the \
             transaction details here for verification."
                .into()
        }
        (OrderStatus::PendingPayment, _) => "Waiting for the client to submit payment.".into(),
        (OrderStatus::PaymentSubmitted, Role::Freelancer) => {
            "Payment proof received. Verify it to start working.".into()
        }
        (OrderStatus::PaymentSubmitted, _) => {
            "Payment awaiting confirmation. The freelancer is verifying your \
             payment; this usually takes 1-2 hours."
                .into()
        }
        (OrderStatus::PaymentConfirmed, Role::Freelancer) => {
            "You have confirmed the payment. Now get to work!".into()
        }
        (OrderStatus::PaymentConfirmed, _) => {
            "The freelancer is working on your project.".into()
        }
        (OrderStatus::Submitted, Role::Client) => {
            "The freelancer has submitted the work. Please review it.".into()
        }
        (OrderStatus::Submitted, _) => "Work submitted. Waiting for client approval.".into(),
        (OrderStatus::Completed, _) => "Order completed! Thank you for using DevMarket.".into(),
        (other, _) => format!("Status: {}", other.as_str().replace('_', " ")),
    }
}
