//! Page views. Each one is a straight composition: acquire session, fetch
//! the records it needs, render to text, dispatch the user's action. No
//! view holds state needed by another view; navigation between them goes
//! through [`Navigation`].

pub mod admin;
pub mod dashboard;
pub mod gigs;
pub mod login;
pub mod messages;
pub mod order;
pub mod review;

use devmarket_client::ApiError;
use uuid::Uuid;

/// Where the shell should go after a view action completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
    GigList,
    GigDetail(Uuid),
    Dashboard,
    OrderDetail(Uuid),
    Conversation(Uuid),
    ReviewForm(Uuid),
}

/// Errors are caught at the page level and surfaced as their display
/// message; nothing here is fatal to the process.
pub(crate) fn page_err(e: ApiError) -> String {
    e.to_string()
}
