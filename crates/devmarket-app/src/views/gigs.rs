use devmarket_client::{ApiClient, Session};
use devmarket_types::api::{GigCreate, OrderCreate};
use devmarket_types::models::Gig;
use uuid::Uuid;

use super::{Navigation, page_err};

/// The public gig listing. A load failure is kept on the view and rendered
/// inline with a retry hint, like every other page-scoped error.
pub struct GigListView {
    gigs: Vec<Gig>,
    error: Option<String>,
}

impl GigListView {
    pub async fn load(api: &ApiClient) -> Self {
        match api.list_gigs().await {
            Ok(gigs) => Self { gigs, error: None },
            Err(e) => Self {
                gigs: Vec::new(),
                error: Some(e.to_string()),
            },
        }
    }

    pub fn gigs(&self) -> &[Gig] {
        &self.gigs
    }

    pub fn render(&self) -> String {
        let mut out = String::from("== Explore Great Services ==\n");
        if let Some(error) = &self.error {
            out.push_str(&format!(
                "{error}. Please check if the backend server is running.\n(type `gigs` to try again)\n"
            ));
            return out;
        }
        if self.gigs.is_empty() {
            out.push_str("No gigs published yet.\n");
            return out;
        }
        for gig in &self.gigs {
            out.push_str(&render_card(gig));
        }
        out
    }
}

pub(crate) fn render_card(gig: &Gig) -> String {
    format!(
        "[{}] {}\n    ${:.2} | {} days delivery\n    {}\n",
        gig.id, gig.title, gig.price, gig.delivery_days, gig.description
    )
}

/// One gig, with a purchase affordance for an authenticated viewer who is
/// not the gig's own freelancer.
pub struct GigDetailView {
    gig: Gig,
}

impl GigDetailView {
    pub async fn load(api: &ApiClient, id: Uuid) -> Result<Self, String> {
        let gig = api.get_gig(id).await.map_err(page_err)?;
        Ok(Self { gig })
    }

    pub fn gig(&self) -> &Gig {
        &self.gig
    }

    pub fn can_order(&self, session: &Session) -> bool {
        session
            .user()
            .is_some_and(|user| user.id != self.gig.freelancer_id)
    }

    /// Purchase: one POST, then navigate to the freshly created order.
    pub async fn order(&self, api: &ApiClient, session: &Session) -> Result<Navigation, String> {
        if session.user().is_none() {
            return Ok(Navigation::Login);
        }
        let order = api
            .create_order(&OrderCreate {
                gig_id: self.gig.id,
            })
            .await
            .map_err(page_err)?;
        Ok(Navigation::OrderDetail(order.id))
    }

    pub fn render(&self, session: &Session) -> String {
        let mut out = format!(
            "== {} ==\n${:.2} | {} days delivery\n\n{}\n",
            self.gig.title, self.gig.price, self.gig.delivery_days, self.gig.description
        );
        if self.can_order(session) {
            out.push_str(&format!("\n(type `buy {}` to order this gig)\n", self.gig.id));
        }
        out
    }
}

/// The "post a new gig" form. Submission navigates back to the listing.
pub struct GigForm {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub delivery_days: u32,
}

impl GigForm {
    pub async fn submit(&self, api: &ApiClient) -> Result<Navigation, String> {
        api.create_gig(&GigCreate {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            delivery_days: self.delivery_days,
        })
        .await
        .map_err(page_err)?;
        Ok(Navigation::GigList)
    }
}
