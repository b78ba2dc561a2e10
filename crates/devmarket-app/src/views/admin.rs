use devmarket_client::ApiClient;

use super::page_err;

/// Minimal admin panel. Gated on any authenticated session for now; a real
/// deployment would check an is_admin flag on the backend.
pub struct AdminView {
    users: usize,
    gigs: usize,
    orders: usize,
}

impl AdminView {
    /// Three independent fetches joined fail-fast: if any one of them
    /// fails, the whole panel fails with that error.
    pub async fn load(api: &ApiClient) -> Result<Self, String> {
        let (_me, gigs, orders) =
            tokio::try_join!(api.me(), api.list_gigs(), api.list_orders()).map_err(page_err)?;
        Ok(Self {
            // No user-count endpoint exists; mirror the identity probe as 1.
            users: 1,
            gigs: gigs.len(),
            orders: orders.len(),
        })
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        (self.users, self.gigs, self.orders)
    }

    pub fn render(&self) -> String {
        format!(
            "== Admin Panel ==\nActive Users:     {}\nTotal Gigs:       {}\nCompleted Orders: {}\n\n-- Pending Approvals --\n(nothing queued)\n",
            self.users, self.gigs, self.orders
        )
    }
}
