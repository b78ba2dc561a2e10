use devmarket_client::ApiClient;
use devmarket_types::models::{Gig, Order, User};

use super::{gigs::render_card, page_err};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Buying,
    Selling,
}

/// The authenticated home screen: orders the viewer participates in, and
/// the viewer's own gigs. "My gigs" is derived by filtering the unfiltered
/// gig collection client-side by ownership; fine at this scale, a known
/// scalability limit beyond it.
pub struct DashboardView {
    user: User,
    tab: Tab,
    orders: Vec<Order>,
    my_gigs: Vec<Gig>,
}

impl DashboardView {
    pub async fn load(api: &ApiClient, user: &User) -> Result<Self, String> {
        let orders = api.list_orders().await.map_err(page_err)?;
        let all_gigs = api.list_gigs().await.map_err(page_err)?;
        let my_gigs = all_gigs
            .into_iter()
            .filter(|gig| gig.freelancer_id == user.id)
            .collect();
        Ok(Self {
            user: user.clone(),
            tab: Tab::Buying,
            orders,
            my_gigs,
        })
    }

    pub fn switch(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn my_gigs(&self) -> &[Gig] {
        &self.my_gigs
    }

    pub fn render(&self) -> String {
        let mut out = format!("== Welcome back, {} ==\n", self.user.full_name);
        match self.tab {
            Tab::Buying => {
                out.push_str("-- Your Orders --\n");
                if self.orders.is_empty() {
                    out.push_str("You haven't bought any services yet.\n");
                } else {
                    for order in &self.orders {
                        out.push_str(&format!(
                            "[{}] status: {}\n",
                            order.id,
                            order.status.as_str().replace('_', " ")
                        ));
                    }
                }
            }
            Tab::Selling => {
                out.push_str("-- Manage Your Gigs --\n");
                if self.my_gigs.is_empty() {
                    out.push_str("You haven't posted any gigs yet.\n");
                } else {
                    for gig in &self.my_gigs {
                        out.push_str(&render_card(gig));
                    }
                }
            }
        }
        out
    }
}
